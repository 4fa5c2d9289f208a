use super::*;

#[test]
fn parses_positional_url() {
    let cli = Cli::try_parse_from(["offerscout", "https://www.walmart.com/ip/6924164794"])
        .expect("expected valid cli args");
    assert_eq!(
        cli.url.as_deref(),
        Some("https://www.walmart.com/ip/6924164794")
    );
    assert!(cli.output.is_none());
}

#[test]
fn url_is_optional() {
    let cli = Cli::try_parse_from(["offerscout"]).expect("expected valid cli args");
    assert!(cli.url.is_none());
}

#[test]
fn rejects_zero_timeout() {
    assert!(Cli::try_parse_from(["offerscout", "--timeout-secs", "0"]).is_err());
}

#[test]
fn flags_override_config() {
    let cli = Cli::try_parse_from([
        "offerscout",
        "--output",
        "offers.json",
        "--timeout-secs",
        "45",
    ])
    .unwrap();
    let mut config = AppConfig::default();
    cli.apply(&mut config);
    assert_eq!(config.output_path, PathBuf::from("offers.json"));
    assert_eq!(config.request_timeout_secs, 45);
}

#[test]
fn prompt_reads_trimmed_link() {
    let mut input = io::Cursor::new("  https://www.walmart.com/ip/1\n");
    let mut output = Vec::new();
    let url = prompt_product_url(&mut input, &mut output).unwrap();
    assert_eq!(url, "https://www.walmart.com/ip/1");
    assert_eq!(String::from_utf8(output).unwrap(), "Enter the product link: ");
}

#[test]
fn prompt_rejects_empty_input() {
    let mut input = io::Cursor::new("\n");
    let mut output = Vec::new();
    assert!(prompt_product_url(&mut input, &mut output).is_err());
}
