use axum::{Json, Router, routing::post};
use flowchart_backend::{GenerateRequest, GenerateResponse, handle_generate};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    // CORS so the frontend can call us easily
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/generate", post(generate_endpoint))
        .layer(cors);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr).await.unwrap();

    println!("Server running on http://{}", addr);

    axum::serve(listener, app).await.unwrap();
}

async fn generate_endpoint(Json(req): Json<GenerateRequest>) -> Json<GenerateResponse> {
    let resp = handle_generate(req);
    Json(resp)
}
