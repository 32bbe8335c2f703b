//! Hotel reservation server creation and serving.
use axum::{routing::get, Router};
use hotel_store::HotelStore;
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct ServerState {
    pub store: HotelStore,
}

fn make_app() -> Router<ServerState> {
    Router::new()
        .route("/healthcheck", get(|| async { "ok" }))
        .nest("/api", crate::api::router())
}

pub struct Server;

impl Server {
    /// Serves the reservation API on the given listener until ctrl-c or
    /// SIGTERM is received.
    pub async fn serve(listener: std::net::TcpListener, state: ServerState) -> Result<(), crate::Error> {
        listener.set_nonblocking(true)?;
        let listener = tokio::net::TcpListener::from_std(listener)?;

        info!("starting server on {}", listener.local_addr()?);

        axum::serve(listener, make_app().with_state(state))
            .with_graceful_shutdown(shutdown())
            .await?;

        Ok(())
    }
}

async fn shutdown() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Cannot install handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down the server");
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use hotel_store::{Reservation, Update};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn make_state() -> ServerState {
        let store = HotelStore::open_in_memory().unwrap();
        store.update().unwrap();
        ServerState { store }
    }

    async fn send(state: &ServerState, request: Request<Body>) -> Response {
        make_app()
            .with_state(state.clone())
            .oneshot(request)
            .await
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_healthcheck() {
        let response = send(&make_state(), empty_request("GET", "/healthcheck")).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_reservation_lifecycle() {
        let state = make_state();

        let response = send(
            &state,
            json_request(
                "POST",
                "/api/v1/reservations",
                json!({
                    "room_number": 101,
                    "client_id": 5,
                    "date_in": "2024-03-01",
                    "date_out": "2024-03-05",
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Reservation = body_json(response).await;
        assert_eq!(created.room_number, 101);

        let response = send(&state, empty_request("GET", "/api/v1/reservations")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let listed: Vec<Reservation> = body_json(response).await;
        assert_eq!(listed, vec![created.clone()]);

        let uri = format!("/api/v1/reservations/{}", created.id);
        let response = send(
            &state,
            json_request(
                "PUT",
                &uri,
                json!({
                    "room_number": 102,
                    "client_id": 5,
                    "date_in": "2024-03-02",
                    "date_out": "2024-03-06",
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Reservation = body_json(response).await;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.room_number, 102);
        assert_eq!(updated.date_in.to_string(), "2024-03-02");

        let response = send(&state, empty_request("GET", &uri)).await;
        assert_eq!(body_json::<Reservation>(response).await, updated);

        let response = send(&state, empty_request("DELETE", &uri)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&state, empty_request("DELETE", &uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = body_json(response).await;
        assert_eq!(
            body["error"]["detail"],
            format!("reservation {} not found", created.id)
        );
    }

    #[tokio::test]
    async fn test_missing_reservation() {
        let state = make_state();

        let response = send(&state, empty_request("GET", "/api/v1/reservations/42")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &state,
            json_request(
                "PUT",
                "/api/v1/reservations/42",
                json!({
                    "room_number": 1,
                    "client_id": 1,
                    "date_in": "2024-01-01",
                    "date_out": "2024-01-02",
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let response = send(
            &make_state(),
            json_request(
                "POST",
                "/api/v1/reservations",
                json!({ "room_number": 101, "date_in": "not a date" }),
            ),
        )
        .await;

        assert!(response.status().is_client_error());
    }
}
