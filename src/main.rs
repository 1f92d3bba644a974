use mazewright::app::{App, AppConfig, USAGE};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        println!("{USAGE}");
        return;
    }

    // Logs go to a file so they never interleave with the drawn maze
    let file_appender = tracing_appender::rolling::never(".", "mazewright.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    let config = match AppConfig::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let app = App::new(config);
    let mut stdout = std::io::stdout();
    if let Err(err) = app.run(&mut stdout) {
        tracing::error!("[app] {}", err);
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
