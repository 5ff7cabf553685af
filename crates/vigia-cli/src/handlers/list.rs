//! The `list` subcommand: print the registered test cases.
//!
//! The data sheet is loaded first because the data-driven invalid-login
//! case expands to one entry per table key.

use vigia::{all_cases, DataTable, MockDriver};

use crate::commands::ListArgs;
use crate::config::CliConfig;
use crate::error::CliResult;

/// Print the case names in execution order.
///
/// # Errors
///
/// Returns a data error when the sheet cannot be loaded.
pub fn execute_list(config: &CliConfig, args: &ListArgs) -> CliResult<()> {
    let data = DataTable::load_sheet(&args.data_dir, &args.sheet)?;
    let names = case_names(&data);
    for name in &names {
        println!("{name}");
    }
    if !config.verbosity.is_quiet() {
        eprintln!("{} cases", names.len());
    }
    Ok(())
}

/// Names of the expanded cases. Case expansion never touches a driver, so
/// the mock stands in for the type parameter.
fn case_names(data: &DataTable) -> Vec<String> {
    all_cases::<MockDriver>(data)
        .iter()
        .map(|case| case.name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> DataTable {
        let mut data = DataTable::new();
        data.insert_row(
            "test_verify_invalidLogin_TC03",
            &[("username", "admin12"), ("password", "admin")],
        );
        data.insert_row(
            "test_create_lead_TC05",
            &[("lastname", "Sharma"), ("company", "TestLeaf")],
        );
        data
    }

    #[test]
    fn test_case_names_expand_per_table_key() {
        let names = case_names(&sample_data());
        assert_eq!(names.len(), 6);
        assert_eq!(names[0], "test_verifyTitle_TC01");
        assert!(names
            .iter()
            .any(|n| n == "test_verify_invalidLogin_TC03[test_create_lead_TC05]"));
        assert_eq!(names[5], "test_create_lead_TC05");
    }

    #[test]
    fn test_execute_list_reads_the_sheet_dir() {
        let dir = tempfile::tempdir().unwrap();
        sample_data()
            .write_csv_path(dir.path().join("LoginData.csv"))
            .unwrap();

        let args = ListArgs {
            data_dir: dir.path().to_path_buf(),
            sheet: "LoginData".to_string(),
        };
        execute_list(&CliConfig::new(), &args).unwrap();
    }

    #[test]
    fn test_execute_list_fails_on_missing_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let args = ListArgs {
            data_dir: dir.path().to_path_buf(),
            sheet: "LoginData".to_string(),
        };
        assert!(execute_list(&CliConfig::new(), &args).is_err());
    }
}
