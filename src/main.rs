use pdfsum::api::start_api_server;
use pdfsum::config::ApiConfig;
use pdfsum::model::create_summary_model;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ApiConfig::from_env().expect("Failed to load configuration");

    let model = create_summary_model(config.model_config())
        .expect("Failed to initialize summarization model");

    println!("📄 Summarization model: {}", model.model_name());
    println!("🚀 Starting PDF summarizer on http://{} ...", config.bind_addr());
    start_api_server(&config, model).await
}
