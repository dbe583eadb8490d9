use spin_pool::{reverse_byte_order, ArgsError, ArgumentParser};

fn new_parser() -> ArgumentParser {
    let mut parser = ArgumentParser::new();
    parser
        .register(&["-p", "--port"], 1)
        .unwrap()
        .register(&["-r", "--range"], 2)
        .unwrap()
        .register(&["-v"], 0)
        .unwrap();
    parser
}

#[test]
fn parse_groups_and_aliases() {
    let mut parser = new_parser();
    parser
        .parse(["--port", "8080", "-r", "1", "9", "-v"])
        .unwrap();

    assert!(parser.is_present("-p"));
    assert!(parser.is_present("--port"));
    assert_eq!(parser.values_for("-p").unwrap(), ["8080"]);
    assert_eq!(parser.values_for("--range").unwrap(), ["1", "9"]);
    assert!(parser.is_present("-v"));
    assert!(parser.values_for("-v").unwrap().is_empty());
}

#[test]
fn repeated_prefix_appends_values() {
    let mut parser = new_parser();
    parser.parse(["-p", "1", "--port", "2"]).unwrap();
    assert_eq!(parser.values_for("-p").unwrap(), ["1", "2"]);
}

#[test]
fn absent_and_unknown_prefixes() {
    let mut parser = new_parser();
    parser.parse(Vec::<String>::new()).unwrap();

    assert!(!parser.is_present("-p"));
    assert!(!parser.is_present("--nope"));
    assert_eq!(
        parser.values_for("-p"),
        Err(ArgsError::NotPresent("-p".to_string()))
    );
    assert_eq!(
        parser.values_for("--nope"),
        Err(ArgsError::NotPresent("--nope".to_string()))
    );
}

#[test]
fn parse_errors() {
    let mut parser = new_parser();
    assert_eq!(
        parser.parse(["--bogus"]),
        Err(ArgsError::UnknownPrefix("--bogus".to_string()))
    );

    let mut parser = new_parser();
    assert_eq!(
        parser.parse(["-r", "1"]),
        Err(ArgsError::TooFewValues {
            prefix: "-r".to_string(),
            expected: 2,
            found: 1,
        })
    );
    assert!(!parser.is_present("-r"));
}

#[test]
fn duplicate_prefix_rejected() {
    let mut parser = new_parser();
    assert_eq!(
        parser.register(&["-x", "--port"], 1).err(),
        Some(ArgsError::DuplicatePrefix("--port".to_string()))
    );
    // the rejected group left nothing behind
    assert_eq!(
        parser.parse(["-x", "1"]),
        Err(ArgsError::UnknownPrefix("-x".to_string()))
    );

    assert_eq!(
        parser.register(&["-y", "-y"], 0).err(),
        Some(ArgsError::DuplicatePrefix("-y".to_string()))
    );
    assert!(parser.register(&["-y"], 0).is_ok());
}

#[test]
fn reverse_integers() {
    assert_eq!(reverse_byte_order(0x12u8), 0x12);
    assert_eq!(reverse_byte_order(0x1234u16), 0x3412);
    assert_eq!(reverse_byte_order(0x1234_5678u32), 0x7856_3412);
    assert_eq!(reverse_byte_order(1i64), 1i64 << 56);
    assert_eq!(reverse_byte_order(reverse_byte_order(-12345i32)), -12345);
}

#[test]
fn reverse_floats() {
    let x = 1.5f64;
    let swapped = reverse_byte_order(x);
    assert_eq!(swapped.to_bits(), x.to_bits().swap_bytes());
    assert_eq!(reverse_byte_order(swapped), x);

    let y = -0.25f32;
    assert_eq!(reverse_byte_order(y).to_be_bytes(), y.to_le_bytes());
}
