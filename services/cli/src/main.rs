use estate_forms_cli::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("estate-forms error: {err}");
        std::process::exit(1);
    }
}
