use clap::Parser;
use julia_benchmark::{
    cli::{
        args::{CommandsEnum, JuliaBenchmarkArgs},
        run::run_benchmark,
    },
    core::{
        error::JuliaError,
        file_io::{extract_base_name, load_params},
        logging::init_logging,
    },
    fractals::julia::JuliaParams,
};

fn main() {
    init_logging();
    let args: JuliaBenchmarkArgs = JuliaBenchmarkArgs::parse();

    if let Err(err) = run(&args) {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

fn run(args: &JuliaBenchmarkArgs) -> Result<(), JuliaError> {
    let params: JuliaParams = match &args.command {
        Some(CommandsEnum::Run(params)) => {
            tracing::info!("Running `{}`", extract_base_name(&params.params_path));
            load_params(&params.params_path)?
        }
        None => {
            tracing::info!("No parameter file given; running the reference configuration");
            JuliaParams::default()
        }
    };

    let report = run_benchmark(&params)?;
    report.display(&mut std::io::stdout().lock())?;

    match &params.expected {
        Some(expected) => {
            expected.verify(&report.summary)?;
            tracing::info!(checksum = report.summary.checksum, "escape counts match the expected output");
        }
        None => tracing::warn!("no expected output configured; skipping validation"),
    }
    Ok(())
}
