use clap::Parser;
use log::debug;
use medpredict::{
  PredictionClient, PredictionConfig, PredictionOptions,
  PredictionRequest, PredictionResult,
};

/// Ask a hosted model for a short health prediction
#[derive(Parser, Debug)]
#[command(name = "medpredict", version, about)]
struct Cli
{   /// Age in years (0-150)
    #[arg(long)]
    age: String
  , /// Symptom category, e.g. "chronic pain"
    #[arg(long)]
    category: String
  , /// Free-text description of the problem
    #[arg(long = "problem")]
    problem_description: String
  , /// Current medication, if any
    #[arg(long)]
    medication: Option<String>
  , /// Print the structured JSON result
    #[arg(long)]
    full: bool
}

#[tokio::main]
async fn main()
{   env_logger::init();
    let cli = Cli::parse();
    debug!("Parsed arguments: {:?}", cli);

    let client = PredictionClient::new(PredictionConfig::from_env());

    let mut request = PredictionRequest::new(
      cli.age,
      cli.category,
      cli.problem_description
    );
    request.medication = cli.medication;

    let options = PredictionOptions
    {   return_full_response: cli.full
    };

    match client.get_prediction(&request, options).await
    {   Ok(PredictionResult::Text(text)) => println!("{}", text)
      , Ok(result) => match serde_json::to_string_pretty(&result)
        {   Ok(json) => println!("{}", json)
          , Err(e) => {
              eprintln!("Failed to encode result: {}", e);
              std::process::exit(1);
            }
        }
      , Err(e) => {
          eprintln!("Error: {}", e);
          std::process::exit(2);
        }
    }
}
