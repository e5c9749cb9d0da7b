use std::process::ExitCode;

use firestore_export::error::ExportError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match firestore_export::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(ExportError::DisplayInfo(info)) => {
            if let Err(e) = info.print() {
                println!("{}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}
