use std::sync::Mutex;
use httpmock::prelude::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;
use medpredict::{
  PredictionClient, PredictionConfig, PredictionOptions,
  PredictionRequest,
};

/// Keeps every record emitted by this crate
struct CaptureLogger
{   records: Mutex<Vec<(Level, String)>>
}

impl Log for CaptureLogger
{   fn enabled(&self, _metadata: &Metadata) -> bool
    {   true
    }

    fn log(&self, record: &Record)
    {   if record.target().starts_with("medpredict")
        {   self.records
              .lock()
              .unwrap()
              .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger
{   records: Mutex::new(Vec::new())
};

/// Error-level messages logged since the last call
fn take_errors() -> Vec<String>
{   LOGGER.records
      .lock()
      .unwrap()
      .drain(..)
      .filter(|(level, _)| *level == Level::Error)
      .map(|(_, text)| text)
      .collect()
}

fn back_pain() -> PredictionRequest
{   PredictionRequest::new(45, "chronic pain", "lower back pain")
}

// One test per binary: the logger is process-wide.
#[tokio::test]
async fn test_each_service_failure_logs_one_error()
{   log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let server = MockServer::start_async().await;
    let unauthorized = server.mock_async(|when, then| {
      when.method(POST).path("/chat/completions");
      then.status(401)
        .json_body(json!({ "error": { "message": "Bad key" } }));
    }).await;

    let client = PredictionClient::new(
      PredictionConfig::default().with_api_base(server.base_url())
    );
    for options in [PredictionOptions::default(), PredictionOptions::full()]
    {   let _ = take_errors();
        let result = client.get_prediction(&back_pain(), options).await;
        assert!(result.is_ok());
        let errors = take_errors();
        assert_eq!(errors.len(), 1, "{:?}", errors);
        assert!(errors[0].contains("401 Bad key"), "{:?}", errors);
    }
    unauthorized.assert_hits_async(2).await;

    let unreachable = PredictionClient::new(
      PredictionConfig::default().with_api_base("http://127.0.0.1:1")
    );
    let _ = take_errors();
    let result = unreachable
      .get_prediction(&back_pain(), PredictionOptions::default())
      .await;
    assert!(result.is_ok());
    let errors = take_errors();
    assert_eq!(errors.len(), 1, "{:?}", errors);

    // Invalid input is returned, not logged as a service failure.
    let invalid = PredictionRequest::new(200, "pain", "ache");
    assert!(client
      .get_prediction(&invalid, PredictionOptions::default())
      .await
      .is_err());
    assert!(take_errors().is_empty());
}
