use std::process::ExitCode;
use vardecimal::Decimal;

fn format_binary(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:08b}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(feature = "logging")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(feature = "logging"))]
fn init_logging() {}

fn inspect(literal: &str) -> Result<(), vardecimal::Error> {
    let value: Decimal = literal.parse()?;
    let comparable = value.encode_comparable();

    println!("{literal}");
    println!("  debug:       {}", value.to_debug_string());
    println!("  scientific:  {}", value.to_scientific_string());
    println!("  display:     {value}");
    println!("  comparable:  {} ({} bytes)", format_binary(&comparable), comparable.len());
    match value.encode_big_decimal() {
        Some(bytes) => println!("  big decimal: {bytes:02X?} ({} bytes)", bytes.len()),
        None => println!("  big decimal: out of range"),
    }

    // Decoding must give back the value and consume the whole encoding
    let (decoded, used) = Decimal::decode_comparable(&comparable)?;
    if decoded != value || used != comparable.len() {
        println!("  ✗ comparable roundtrip mismatch: {decoded:?} ({used} bytes)");
    }
    println!();
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let literals: Vec<&str> = if args.is_empty() {
        vec![
            "-9847.236776e+2147483653",
            "-1.34",
            "-13.37e-1",
            "-0",
            "120e0",
            "1.2e+100",
            "2638.2e+3624",
            "9.012e-36546632732954564791",
        ]
    } else {
        args.iter().map(String::as_str).collect()
    };

    let mut status = ExitCode::SUCCESS;
    for literal in literals {
        if let Err(e) = inspect(literal) {
            eprintln!("Error in {literal:?}: {e}");
            status = ExitCode::FAILURE;
        }
    }
    status
}
