use astar_visualizer::app::App;
use astar_visualizer::config::Config;
use clap::Parser;
use std::io::{self, Write};

fn main() {
    // The terminal UI owns stdout, keep the default log level quiet.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let config = Config::parse();
    log::info!("Starting with {:?}", config);

    let headless = config.headless;
    let result = App::new(config).and_then(|mut app| {
        if headless {
            app.run_headless(io::stdout().lock()).map(|_| ())
        } else {
            app.run_interactive()
        }
    });

    if let Err(e) = result {
        eprintln!("astar_visualizer: {e}");
        std::process::exit(1);
    }
}
