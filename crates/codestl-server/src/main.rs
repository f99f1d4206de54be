use clap::Parser;
use codestl_core::pipeline::CodePipeline;
use codestl_core::{config, logging};
use codestl_server::cli::Cli;
use codestl_server::server::{BoundServer, ServerContext};

fn main() {
    // Initialize logging as early as possible.
    logging::init();

    if let Err(err) = run() {
        eprintln!("codestl-server error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_init()?;
    cli.apply(&mut cfg);
    tracing::debug!("effective config: {:?}", cfg);

    let pipeline = CodePipeline::from_config(&cfg)?;
    let bound = BoundServer::bind(cfg.interface, cfg.port)?;
    tracing::info!("listening on http://{}", bound.addr());

    let shutdown = bound.shutdown_handle();
    ctrlc::set_handler(move || shutdown.stop())?;

    bound.run(ServerContext::new(cfg, Box::new(pipeline)))
}
