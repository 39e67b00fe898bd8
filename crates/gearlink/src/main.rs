use anyhow::{Context, Result};
use gearlink::{run_link_session, LinkSessionConfig};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let payload = args.next().unwrap_or_else(|| "HELLO GEAR".to_string());
    let baud_selector = match args.next() {
        Some(arg) => arg
            .parse::<u8>()
            .with_context(|| format!("invalid baud selector '{arg}' (expected 0-3)"))?,
        None => 0,
    };
    if baud_selector > 3 {
        eprintln!(
            "Unknown baud selector '{}'. Supported: 0 (4800), 1 (2400), 2 (1200), 3 (300)",
            baud_selector
        );
        std::process::exit(1);
    }

    let config = LinkSessionConfig::builder()
        .payload(payload.into_bytes())
        .baud_selector(baud_selector)
        .build();
    let report = run_link_session(&config)?;

    println!("received: {}", String::from_utf8_lossy(&report.received));
    println!("bytes:    {:02X?}", report.received);
    println!("NMIs:     {}", report.nmi_count);
    println!("clocks:   {}", report.clocks);
    Ok(())
}
