#![allow(dead_code)]

use std::time::Duration;

use oop_grader::java::{
    BuildRunner, CompileReport, RunOutcome, ScratchSpace, SourceFile, Submission,
    parsers::javac_diagnostics,
};

/// Compiles and runs nothing; answers with canned results.
pub struct FakeRunner {
    pub compiles: bool,
    pub outcome:  RunOutcome,
}

impl FakeRunner {
    pub fn printing(stdout: &str) -> Self {
        Self {
            compiles: true,
            outcome:  RunOutcome::Completed {
                stdout: stdout.to_string(),
            },
        }
    }

    pub fn not_compiling() -> Self {
        Self {
            compiles: false,
            outcome:  RunOutcome::NoEntryPoint,
        }
    }

    pub fn ending_with(outcome: RunOutcome) -> Self {
        Self {
            compiles: true,
            outcome,
        }
    }
}

impl BuildRunner for FakeRunner {
    async fn compile(&self, _scratch: &ScratchSpace, _files: &[SourceFile]) -> CompileReport {
        if self.compiles {
            CompileReport {
                success: true,
                ..CompileReport::default()
            }
        } else {
            let errors = "./LoanAccount.java:3: error: ';' expected\n1 error\n";
            CompileReport {
                success:     false,
                errors:      errors.to_string(),
                diagnostics: javac_diagnostics(errors),
            }
        }
    }

    async fn run(
        &self,
        _scratch: &ScratchSpace,
        _files: &[SourceFile],
        _timeout: Duration,
    ) -> RunOutcome {
        self.outcome.clone()
    }
}

pub fn submission(files: &[(&str, &str)]) -> Submission {
    let files = files
        .iter()
        .map(|(name, code)| SourceFile::new(*name, *code))
        .collect();
    Submission::new("Jane Doe", "1234", files)
}

pub const PA1_LOAN_ACCOUNT: &str = r#"
public class LoanAccount {
    private static double annualInterestRate;
    private double principal;

    public LoanAccount(double principal) {
        this.principal = principal;
    }

    public double calculateMonthlyPayment(int numberOfPayments) {
        double monthlyInterest = annualInterestRate / 12;
        return principal * (monthlyInterest / (1 - Math.pow(1 + monthlyInterest, -numberOfPayments)));
    }

    public static void setAnnualInterestRate(double rate) {
        annualInterestRate = rate / 100;
    }
}
"#;

pub const PA1_MAIN: &str = r#"
public class Main {
    public static void main(String[] args) {
        LoanAccount loan1 = new LoanAccount(5000.00);
        LoanAccount loan2 = new LoanAccount(31000.00);
        int[] terms = {36, 60, 72};
        double[] rates = {1.0, 5.0};
        for (double rate : rates) {
            LoanAccount.setAnnualInterestRate(rate);
            System.out.printf("Monthly payments at %.0f%% interest%n", rate);
            for (int term : terms) {
                System.out.printf("%-6d %-9.2f %-9.2f%n", term,
                    loan1.calculateMonthlyPayment(term), loan2.calculateMonthlyPayment(term));
            }
        }
    }
}
"#;

pub const PA1_OUTPUT: &str = "\
Monthly payments at 1% interest
Term   Loan 1    Loan 2
36     141.04    874.45
60     85.47     529.91
72     71.58     443.78
Monthly payments at 5% interest
36     149.85    929.10
60     94.36     585.01
72     80.52     499.25
";

pub const PA2_LOAN_ACCOUNT: &str = r#"
public class LoanAccount {
    private double principal;
    private double annualInterestRate;
    private int months;

    public LoanAccount(double principal, double annualInterestRate, int months) {
        this.principal = principal;
        this.annualInterestRate = annualInterestRate;
        this.months = months;
    }

    public double calculateMonthlyPayment() {
        double monthlyInterest = annualInterestRate / 100 / 12;
        return principal * (monthlyInterest / (1 - Math.pow(1 + monthlyInterest, -months)));
    }

    public double getPrincipal() { return principal; }
    public double getAnnualInterestRate() { return annualInterestRate; }
    public int getMonths() { return months; }

    @Override
    public String toString() {
        return String.format("Principal: $%.2f%nAnnual Interest Rate: %.2f%%%nTerm of Loan in Months: %d%nMonthly Payment: $%.2f%n",
            principal, annualInterestRate, months, calculateMonthlyPayment());
    }
}
"#;

pub const PA2_CAR_LOAN: &str = r#"
public class CarLoan extends LoanAccount {
    private String vehicleVIN;

    public CarLoan(double principal, double rate, int months, String vehicleVIN) {
        super(principal, rate, months);
        this.vehicleVIN = vehicleVIN;
    }

    @Override
    public String toString() {
        return "Car Loan with:\n" + super.toString() + "Vehicle VIN: " + vehicleVIN + "\n";
    }
}
"#;

pub const PA2_PRIMARY_MORTGAGE: &str = r#"
public class PrimaryMortgage extends LoanAccount {
    private double PMIMonthlyAmount;
    private Address address;

    public PrimaryMortgage(double principal, double rate, int months, double pmi, Address address) {
        super(principal, rate, months);
        this.PMIMonthlyAmount = pmi;
        this.address = address;
    }

    @Override
    public String toString() {
        return "Primary Mortgage Loan with:\n" + super.toString()
            + String.format("PMI Monthly Amount: $%.2f%n", PMIMonthlyAmount)
            + "Property Address:\n" + address.toString();
    }
}
"#;

pub const PA2_UNSECURED_LOAN: &str = r#"
public class UnsecuredLoan extends LoanAccount {
    public UnsecuredLoan(double principal, double rate, int months) {
        super(principal, rate, months);
    }

    @Override
    public String toString() {
        return "Unsecured Loan with:\n" + super.toString();
    }
}
"#;

pub const PA2_ADDRESS: &str = r#"
public class Address {
    private String street;
    private String city;
    private String state;
    private String zipcode;

    public Address(String street, String city, String state, String zipcode) {
        this.street = street;
        this.city = city;
        this.state = state;
        this.zipcode = zipcode;
    }

    public String getStreet() { return street; }
    public String getCity() { return city; }
    public String getState() { return state; }
    public String getZipcode() { return zipcode; }

    @Override
    public String toString() {
        return "    " + street + "\n    " + city + ", " + state + " " + zipcode + "\n";
    }
}
"#;

pub const PA3_CUSTOMER: &str = r#"
import java.util.ArrayList;

public class Customer {
    private String firstName;
    private String lastName;
    private String SSN;
    private ArrayList<LoanAccount> loanAccounts;

    public Customer(String firstName, String lastName, String SSN) {
        this.firstName = firstName;
        this.lastName = lastName;
        this.SSN = SSN;
        this.loanAccounts = new ArrayList<>();
    }

    public String getFirstName() { return firstName; }
    public String getLastName() { return lastName; }
    public String getSSN() { return SSN; }

    public void addLoanAccount(LoanAccount account) {
        loanAccounts.add(account);
    }

    public void printMonthlyReport() {
        System.out.println("Account Report for Customer: " + firstName + " " + lastName + " with SSN " + SSN);
        for (LoanAccount account : loanAccounts) {
            System.out.println(account);
        }
    }
}
"#;
