mod assign_tests;
mod parser_tests;
mod property_tests;
mod scenario_tests;
mod serde_tests;
