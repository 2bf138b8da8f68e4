use house_disclosures::clerk::dataset::join_filings;
use house_disclosures::clerk::index::parse_filing_index;
use house_disclosures::clerk::transactions::tabulate_text;

const INDEX_HTML: &str = r#"
<table>
  <thead>
    <tr><th>Name</th><th>Office</th><th>Filing Year</th><th>Filing</th></tr>
  </thead>
  <tbody>
    <tr>
      <td data-label="Name"><a href="/public_disc/financial-pdfs/2016/10015814.pdf">Doe, John</a></td>
      <td data-label="Office">CA11</td>
      <td data-label="Filing Year">2016</td>
      <td data-label="Filing">PTR Original</td>
    </tr>
  </tbody>
</table>
"#;

#[test]
fn index_and_document_text_to_joined_dataset() {
    let filings = parse_filing_index(INDEX_HTML, 2014);
    assert_eq!(filings.len(), 1);
    let reference = filings[0].document_reference.as_deref().unwrap();
    assert_eq!(reference, "/public_disc/financial-pdfs/2016/10015814.pdf");

    let text = "\nApple Inc (AAPL) ST $1,001 - $15,000\n";
    let transactions = tabulate_text(reference, text, true);
    assert_eq!(transactions.len(), 1);

    let dataset = join_filings(&transactions, &filings);
    assert_eq!(dataset.len(), 1);

    let row = &dataset.rows()[0];
    assert_eq!(row.filer_name, "Doe, John");
    assert_eq!(row.filing_type, "PTR Original");
    assert_eq!(row.filing_year, 2016);
    assert_eq!(row.transaction.ticker.as_deref(), Some("AAPL"));
    assert_eq!(row.transaction.lower_bound, Some(1001));
    assert_eq!(row.transaction.upper_bound, Some(15000));
    assert_eq!(row.transaction.midpoint, Some(8000.5));
}

#[test]
fn csv_round_trip_to_disk() {
    let filings = parse_filing_index(INDEX_HTML, 2014);
    let reference = filings[0].document_reference.as_deref().unwrap();
    let transactions = tabulate_text(
        reference,
        "\nApple Inc (AAPL) ST $1,001 - $15,000\n",
        true,
    );
    let dataset = join_filings(&transactions, &filings);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transactions.csv");
    dataset
        .write_csv(std::fs::File::create(&path).unwrap())
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("/public_disc/financial-pdfs/2016/10015814.pdf"));
    assert!(lines[1].contains("AAPL"));
}

#[test]
fn noise_lines_never_reach_the_dataset() {
    let filings = parse_filing_index(INDEX_HTML, 2014);
    let reference = filings[0].document_reference.as_deref().unwrap();

    // A mis-captured header row, a treasury note without a ticker, and a
    // real equity line.
    let text = "\nAsset Description (XX) ST $1,001 - $15,000\n\
                \nUS Treasury Note ST $1,001 - $15,000\n\
                \nApple Inc (AAPL) ST $1,001 - $15,000\n";
    let transactions = tabulate_text(reference, text, true);
    let dataset = join_filings(&transactions, &filings);

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.rows()[0].transaction.ticker.as_deref(), Some("AAPL"));
}
