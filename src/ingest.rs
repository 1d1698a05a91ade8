use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Result, TallyError};
use crate::models::{AccountType, Transaction};

/// Per-account source files. Exports use whatever column names the bank
/// picked; columns are renormalized positionally to date/description/out/in.
/// The visa export carries a trailing junk column that is dropped.
const ACCOUNT_FILES: &[(&str, AccountType, bool)] = &[
    ("checking.csv", AccountType::Debit, false),
    ("visa.csv", AccountType::Credit, true),
    ("savings.csv", AccountType::Savings, false),
];

pub const EXPORT_FILE: &str = "transactions.csv";

fn parse_amount(raw: &str) -> Result<Option<f64>> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        let value: f64 = inner
            .trim()
            .parse()
            .map_err(|_| TallyError::Other(format!("bad amount: {raw}")))?;
        return Ok(Some(-value));
    }
    let value: f64 = s
        .parse()
        .map_err(|_| TallyError::Other(format!("bad amount: {raw}")))?;
    Ok(Some(value))
}

fn parse_file(path: &Path, account: AccountType, drop_last: bool) -> Result<Vec<Transaction>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let bad = |reason: String| TallyError::BadRecord {
        file: file_name.clone(),
        reason,
    };

    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let expected = if drop_last { 5 } else { 4 };
        if record.len() < expected {
            return Err(bad(format!(
                "expected {expected} columns, got {}",
                record.len()
            )));
        }
        let date = NaiveDate::parse_from_str(record[0].trim(), "%Y-%m-%d")
            .map_err(|_| bad(format!("bad date: {}", &record[0])))?;
        let amount_out =
            parse_amount(&record[2]).map_err(|e| bad(e.to_string()))?;
        let amount_in =
            parse_amount(&record[3]).map_err(|e| bad(e.to_string()))?;
        rows.push(Transaction {
            date,
            description: record[1].trim().to_string(),
            amount_out,
            amount_in,
            account,
            category: String::new(),
        });
    }
    Ok(rows)
}

/// Load and merge all account files found under `data_dir`. Absent files are
/// skipped so single-account setups work; finding none at all is an error.
pub fn load_transactions(data_dir: &Path) -> Result<Vec<Transaction>> {
    let mut merged = Vec::new();
    let mut found = 0usize;
    for (file, account, drop_last) in ACCOUNT_FILES {
        let path = data_dir.join(file);
        if !path.exists() {
            continue;
        }
        found += 1;
        merged.extend(parse_file(&path, *account, *drop_last)?);
    }
    if found == 0 {
        return Err(TallyError::NoData(data_dir.display().to_string()));
    }
    Ok(merged)
}

/// Most-recent-first row order; stable within a date.
pub fn sort_most_recent_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Export the categorized set. Removed rows are simply absent.
pub fn write_transactions(path: &Path, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for txn in transactions {
        wtr.serialize(txn)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_checking_columns_renormalized() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "checking.csv",
            "Date,Transaction Description,Funds Out,Funds In\n\
             2025-03-10,COFFEE SHOP,4.50,\n\
             2025-03-11,PAYROLL,,\"1,200.00\"\n",
        );
        let txns = load_transactions(dir.path()).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].description, "COFFEE SHOP");
        assert_eq!(txns[0].amount_out, Some(4.50));
        assert_eq!(txns[0].amount_in, None);
        assert_eq!(txns[0].account, AccountType::Debit);
        assert_eq!(txns[1].amount_in, Some(1200.00));
    }

    #[test]
    fn test_visa_trailing_column_dropped() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "visa.csv",
            "Date,Description,Debit,Credit,Balance\n\
             2025-03-12,UBER TRIP,18.00,,452.10\n",
        );
        let txns = load_transactions(dir.path()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].account, AccountType::Credit);
        assert_eq!(txns[0].amount_out, Some(18.00));
        assert_eq!(txns[0].amount_in, None);
    }

    #[test]
    fn test_absent_files_skipped_and_merged() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "checking.csv",
            "Date,Description,Out,In\n2025-03-10,COFFEE SHOP,4.50,\n",
        );
        write(
            dir.path(),
            "savings.csv",
            "Date,Description,Out,In\n2025-03-14,INTEREST,,0.42\n",
        );
        let txns = load_transactions(dir.path()).unwrap();
        assert_eq!(txns.len(), 2);
        assert!(txns.iter().any(|t| t.account == AccountType::Savings));
    }

    #[test]
    fn test_no_account_files_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_transactions(dir.path()).unwrap_err(),
            TallyError::NoData(_)
        ));
    }

    #[test]
    fn test_bad_date_is_an_error_not_a_silent_skip() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "checking.csv",
            "Date,Description,Out,In\n03/10/2025,COFFEE SHOP,4.50,\n",
        );
        assert!(matches!(
            load_transactions(dir.path()).unwrap_err(),
            TallyError::BadRecord { .. }
        ));
    }

    #[test]
    fn test_sort_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "checking.csv",
            "Date,Description,Out,In\n\
             2025-03-10,OLD,1.00,\n\
             2025-03-14,NEW,2.00,\n\
             2025-03-12,MID,3.00,\n",
        );
        let mut txns = load_transactions(dir.path()).unwrap();
        sort_most_recent_first(&mut txns);
        let order: Vec<&str> = txns.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, vec!["NEW", "MID", "OLD"]);
    }

    #[test]
    fn test_export_includes_category_column() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "checking.csv",
            "Date,Description,Out,In\n2025-03-10,COFFEE SHOP,4.50,\n",
        );
        let mut txns = load_transactions(dir.path()).unwrap();
        txns[0].category = "Food".to_string();
        let out_path = dir.path().join(EXPORT_FILE);
        write_transactions(&out_path, &txns).unwrap();
        let content = std::fs::read_to_string(&out_path).unwrap();
        assert!(content.starts_with("date,description,out,in,type,category"));
        assert!(content.contains("2025-03-10,COFFEE SHOP,4.5,,debit,Food"));
    }

    #[test]
    fn test_parse_amount_tolerates_bank_formatting() {
        assert_eq!(parse_amount("").unwrap(), None);
        assert_eq!(parse_amount("$1,234.56").unwrap(), Some(1234.56));
        assert_eq!(parse_amount("(42.00)").unwrap(), Some(-42.00));
        assert!(parse_amount("n/a").is_err());
    }
}
