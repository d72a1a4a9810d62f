//! Duck Hunt entry point
//!
//! Native: runs a headless attract-mode session against a JSON save file and
//! prints the final snapshot. The browser build is driven from `duck_hunt::web`.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(version, about = "Headless Duck Hunt session in attract mode")]
struct Args {
    /// Settings JSON file
    #[arg(long, default_value = "duck_hunt_settings.json")]
    settings: PathBuf,

    /// Save file holding the energy record
    #[arg(long, default_value = "duck_hunt_save.json")]
    store: PathBuf,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks to run (60 per second)
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use duck_hunt::clock::SystemClock;
    use duck_hunt::consts::SIM_DT;
    use duck_hunt::persistence::file::JsonFileStore;
    use duck_hunt::platform::FrameDriver;
    use duck_hunt::{Session, Settings};

    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::load_from(&args.settings);
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    log::info!("Duck Hunt (native) starting, {} ticks", args.ticks);

    let store = JsonFileStore::open(&args.store);
    log::info!("Energy saved to {}", store.path().display());
    let mut session = Session::new(&settings, Box::new(store), Box::new(SystemClock));
    let mut driver = FrameDriver::new();
    driver.input.idle_mode = true;

    let mut ticks = 0;
    while ticks < args.ticks {
        ticks += u64::from(driver.frame(&mut session, SIM_DT));
        for event in session.drain_events() {
            log::info!("[{:>6}] {:?}", ticks, event);
        }
    }
    driver.stop();

    println!("{}", session.snapshot().to_json());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is duck_hunt::web::wasm_start, this is just to satisfy the compiler
}
