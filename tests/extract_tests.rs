use oop_grader::java::{
    SearchScope, SourceFacts, SourceFile, Submission,
    extract::blank_comments_and_strings,
    facts::parameter_types,
};

const MORTGAGE: &str = r#"
package edu.loans;

import java.util.ArrayList;

// class PaymentPlan {} in a comment is not a class
public class PrimaryMortgage extends LoanAccount {
    private double PMIMonthlyAmount;
    private Address address;
    protected static final int MAX_TERM = 360, MIN_TERM = 12;
    ArrayList<String> notes = new ArrayList<>();

    public PrimaryMortgage(double principal, double rate, int months, double pmi, Address address) {
        super(principal, rate, months);
        this.PMIMonthlyAmount = pmi;
        this.address = address;
    }

    @Override
    public String toString() {
        return "PMI: " + PMIMonthlyAmount;
    }

    static class Escrow {
        private double balance;
    }
}
"#;

const BROKEN_CAR_LOAN: &str = r#"
public class CarLoan extends LoanAccount {
    private String vehicleVIN;

    public CarLoan(double principal, double rate, int months, String vin) {
        super(principal, rate, months);
        this.vehicleVIN = vin
    }

    public String getVehicleVIN() {
        return vehicleVIN;
    }
}
"#;

#[test]
fn parsed_source_yields_class_facts() {
    let facts = SourceFacts::parse(MORTGAGE);
    assert!(facts.is_parsed());
    assert_eq!(facts.fallback_reason(), None);
    assert_eq!(facts.class_names(), vec!["PrimaryMortgage", "Escrow"]);

    let mortgage = facts.class("primarymortgage").expect("class found ignoring case");
    assert!(mortgage.extends("LoanAccount"));

    let names: Vec<&str> = mortgage.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["PMIMonthlyAmount", "address", "MAX_TERM", "MIN_TERM", "notes"]);

    let max_term = &mortgage.fields[2];
    assert!(max_term.is_static());
    assert!(max_term.has_modifier("final"));
    assert!(!max_term.is_private());
    assert_eq!(mortgage.fields[4].declared_type, "ArrayList<String>");

    assert_eq!(mortgage.constructors.len(), 1);
    assert_eq!(
        mortgage.constructors[0].parameter_types,
        vec!["double", "double", "int", "double", "Address"]
    );

    let to_string = &mortgage.methods[0];
    assert_eq!(to_string.name, "toString");
    assert_eq!(to_string.return_type, "String");
    assert_eq!(to_string.arity(), 0);
    assert!(!to_string.modifiers.contains("@Override"));
}

#[test]
fn nested_class_members_stay_with_the_nested_class() {
    let facts = SourceFacts::parse(MORTGAGE);
    let escrow = facts.class("Escrow").expect("nested class found");
    assert_eq!(escrow.fields.len(), 1);
    assert_eq!(escrow.fields[0].name, "balance");
    assert!(
        facts
            .class("PrimaryMortgage")
            .expect("outer class")
            .fields
            .iter()
            .all(|f| f.name != "balance")
    );
}

#[test]
fn malformed_source_falls_back_to_patterns() {
    let facts = SourceFacts::parse(BROKEN_CAR_LOAN);
    assert!(!facts.is_parsed());
    assert!(facts.fallback_reason().is_some());
    assert!(facts.parser().is_none());

    let car = facts.class("CarLoan").expect("class found by pattern");
    assert_eq!(car.superclass.as_deref(), Some("LoanAccount"));
    assert_eq!(car.fields.len(), 1);
    assert_eq!(car.fields[0].name, "vehicleVIN");
    assert!(car.fields[0].is_private());
    assert_eq!(car.constructors.len(), 1);
    assert_eq!(car.constructors[0].arity(), 4);
    assert!(car.methods.iter().any(|m| m.name == "getVehicleVIN" && m.arity() == 0));
}

#[test]
fn fallback_ignores_locals_and_calls() {
    let source = r#"
class Driver {
    private int count;
    void run() {
        int local = 3;
        if (local > 2) { helper(local); }
    }
"#;
    let facts = SourceFacts::parse(source);
    assert!(!facts.is_parsed());

    let driver = facts.class("Driver").expect("class found by pattern");
    let fields: Vec<&str> = driver.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, vec!["count"]);
    let methods: Vec<&str> = driver.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["run"]);
}

#[test]
fn comments_and_strings_are_blanked_in_place() {
    let source = "int a; // class Fake {\nString s = \"class Other {\";";
    let blanked = blank_comments_and_strings(source);
    assert_eq!(blanked.len(), source.len());
    assert!(!blanked.contains("Fake"));
    assert!(!blanked.contains("Other"));
    assert!(blanked.contains("int a;"));
    assert_eq!(blanked.lines().count(), 2);
}

#[test]
fn generic_commas_do_not_split_parameters() {
    assert_eq!(
        parameter_types("(final Map<String, Integer> counts, @NotNull int[] xs)"),
        vec!["Map<String, Integer>", "int[]"]
    );
    assert!(parameter_types("()").is_empty());
}

#[test]
fn source_search_covers_unit_or_submission() {
    let submission = Submission::new(
        "Jane Doe",
        "",
        vec![
            SourceFile::new("PrimaryMortgage.java", MORTGAGE),
            SourceFile::new("Formula.java", "class Formula { double f() { return Math.pow(2, 3); } }"),
        ],
    );
    let mortgage = submission.files()[0].facts();

    assert!(!mortgage.source_contains(r"Math\.pow", SearchScope::Unit));
    assert!(mortgage.source_contains(r"Math\.pow", SearchScope::Submission));
    assert!(!mortgage.source_contains("(unclosed", SearchScope::Unit));
    assert!(submission.source_contains(r"extends\s+LoanAccount"));
    assert!(submission.combined_source().starts_with(MORTGAGE));
    assert!(submission.combined_source().ends_with("Math.pow(2, 3); } }"));
}

#[test]
fn source_file_detects_package_and_entry_point() {
    let main = SourceFile::new(
        "src/Main.java",
        "package edu.loans;\npublic class Main { public static void main(String[] args) {} }",
    );
    assert_eq!(main.file_name(), "Main.java");
    assert_eq!(main.package_name(), Some("edu.loans"));
    assert!(main.has_main());
    assert_eq!(main.proper_name(), "edu.loans.Main");
    assert_eq!(
        main.package_relative_path(),
        std::path::PathBuf::from("edu/loans/Main.java")
    );

    let broken = SourceFile::new("Main.java", "public class Main { public static void main(String[] a) { int x }");
    assert!(!broken.facts().is_parsed());
    assert!(broken.has_main());
    assert_eq!(broken.class_name(), "Main");
}

#[test]
fn facts_report_serializes() {
    let facts = SourceFacts::parse(BROKEN_CAR_LOAN);
    let json = serde_json::to_value(facts.report()).expect("report serializes");
    assert_eq!(json["parsed"], false);
    assert_eq!(json["classes"][0]["name"], "CarLoan");
}

#[test]
fn files_are_identified_by_any_of_their_names() {
    let submission = Submission::new(
        "Jane Doe",
        "",
        vec![
            SourceFile::new("Main.java", "package app;\npublic class Main {}"),
            SourceFile::new("LoanAccount.java", "public class LoanAccount {}"),
        ],
    );

    for name in ["LoanAccount.java", "LoanAccount", "app.Main", "Main"] {
        assert!(submission.identify(name).is_ok(), "{name}");
    }
    assert!(submission.identify("CarLoan").is_err());
}
