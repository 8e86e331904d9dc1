use yenquit_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("yenquit error: {err}");
        std::process::exit(1);
    }
}
