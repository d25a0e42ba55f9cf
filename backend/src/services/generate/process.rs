use actix_web::{web, HttpResponse};
use common::requests::{GenerateRequest, GenerateResponse};
use log::{error, info};

use super::{GeminiClient, GenerateError};

pub async fn process(
    client: web::Data<GeminiClient>,
    payload: web::Json<GenerateRequest>,
) -> Result<HttpResponse, GenerateError> {
    let options = payload.into_inner();
    options.validate()?;
    info!(
        "Generating {} template about {:?}",
        options.email_type, options.topic
    );

    match client.generate(&options).await {
        Ok(html) => Ok(HttpResponse::Ok().json(GenerateResponse { html })),
        Err(e) => {
            error!("Gemini API error: {:?}", e);
            Err(e)
        }
    }
}
