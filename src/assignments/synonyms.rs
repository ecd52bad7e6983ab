#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Field and method names students use for the same concept. Compared with
//! [`crate::grade::matching::name_matches`], so case and underscores do not
//! matter.

/// Loan principal
pub const PRINCIPAL: &[&str] = &["principal", "principle", "loanAmount"];

/// Annual interest rate
pub const RATE: &[&str] = &["annualInterestRate", "annualInterest", "interestRate", "rate"];

/// Loan term in months
pub const MONTHS: &[&str] = &["months", "numberOfMonths", "term", "numMonths", "loanTerm"];

/// Getters for the three loan properties
pub const LOAN_GETTERS: &[&str] = &[
    "getPrincipal",
    "getAnnualInterestRate",
    "getMonths",
    "getInterestRate",
    "getRate",
    "getNumberOfMonths",
    "getTerm",
    "getLoanTerm",
];

/// Vehicle identification number
pub const VIN: &[&str] = &["vehicleVIN", "vin", "vinNumber"];

/// Private mortgage insurance amount
pub const PMI: &[&str] = &[
    "PMIMonthlyAmount",
    "pmi",
    "pmiMonthlyPayment",
    "pmiAmount",
    "monthlyAmount",
    "pmiMonthly",
];

/// Property address of a mortgage
pub const PROPERTY_ADDRESS: &[&str] = &["address", "propertyAddress", "addr"];

/// Street line of an address
pub const STREET: &[&str] = &["street", "streetAddress", "address", "houseNumber"];

/// City of an address
pub const CITY: &[&str] = &["city", "cityName"];

/// State of an address
pub const STATE: &[&str] = &["state", "stateName", "st"];

/// Zip code of an address
pub const ZIP: &[&str] = &["zipcode", "zip", "postalCode"];

/// Getters for the four address properties
pub const ADDRESS_GETTERS: &[&str] = &[
    "getStreet",
    "getCity",
    "getState",
    "getZipcode",
    "getZip",
    "getPostalCode",
    "getAddress",
];

/// Customer first name
pub const FIRST_NAME: &[&str] = &["firstName", "fname", "first"];

/// Customer last name
pub const LAST_NAME: &[&str] = &["lastName", "lname", "last"];

/// Social security number
pub const SSN: &[&str] = &["ssn", "socialSecurityNumber", "social", "socialSecurity"];

/// The customer's list of loans
pub const LOAN_LIST: &[&str] = &["loanAccounts", "loans", "loanList", "accounts", "loanAccount"];
