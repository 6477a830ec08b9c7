/// Example: Load an ASCII map file and walk through it in the terminal
///
/// Usage: cargo run --example walk_map -- path/to/map.txt
use std::env;
use std::io;
use wallcast_core::level::{Level, DEFAULT_CELL_SIZE};
use wallcast_core::RendererConfig;
use wallcast_terminal::TerminalApp;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let level = if args.len() < 2 {
        eprintln!("Usage: {} <map-file>", args[0]);
        eprintln!("\nNo map provided, using the demo map...");
        Level::demo()
    } else {
        println!("Loading map: {}", args[1]);
        Level::load(&args[1], DEFAULT_CELL_SIZE)
    }
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to load map: {}", e)))?;

    println!("Loaded {} walls", level.face_count());
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(level, RendererConfig::default(), 75.0)?;
    app.run()?;

    println!("Thank you for using the wallcast terminal renderer!");
    Ok(())
}
