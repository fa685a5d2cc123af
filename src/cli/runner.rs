use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use modrun::api::{RunRequest, run_module};
use modrun::io::{ExecOutcome, LocalStager};
use modrun::ModuleLayout;

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn request_from_args(args: CliArgs) -> Result<RunRequest, AppError> {
    if args.module_name.trim().is_empty() {
        return Err(AppError::EmptyModuleName);
    }
    if !args.run_arguments.is_file() {
        return Err(AppError::RunArgumentsNotFound {
            path: args.run_arguments,
        });
    }
    let layout = ModuleLayout::new(args.template_dir, args.module_dir);
    let template_path = layout.template_path(&args.module_name);
    if !template_path.is_file() {
        return Err(AppError::TemplateNotFound {
            module: args.module_name,
            path: template_path,
        });
    }

    Ok(RunRequest {
        module: args.module_name,
        run_arguments: args.run_arguments,
        working_dir: args.working_dir,
        layout,
        mock: args.mock,
        upload: !args.no_upload,
    })
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let request = request_from_args(args).inspect_err(|e| error!("{}", e))?;
    info!(
        "Running module {} with {:?}",
        request.module, request.run_arguments
    );

    let report = match run_module(&request, &LocalStager::new()) {
        Ok(report) => report,
        Err(e) => {
            error!("Module {} failed: {}", request.module, e);
            return Err(AppError::from(e).into());
        }
    };

    println!("{}", report.command);
    match &report.outcome {
        ExecOutcome::DryRun { .. } => info!("Dry run complete"),
        ExecOutcome::Completed { stdout_file } => {
            info!("Program completed; stdout: {:?}", stdout_file)
        }
    }
    if let Some(dest) = &report.uploaded_to {
        info!("Uploaded {:?} to {}", report.output_dir, dest);
    }
    info!("Run log: {:?}", report.run_log);

    Ok(())
}
