//! Headless demo entry point.

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Covermorph");

    let path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let report = match covermorph_app::run(path.as_deref()) {
        Ok(report) => report,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("covermorph: {}", e);
            std::process::exit(1);
        }
    };

    println!("{} frames", report.frames);
    for event in &report.events {
        println!("{}", event);
    }
    println!("{}", report.saved);
    match report.envelope().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("covermorph: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
