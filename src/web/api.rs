use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::info;
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::dijkstra::Strategy;
use crate::algorithm::RunResult;
use crate::config::make_rng;
use crate::graph::directed::DirectedGraph;
use crate::graph::generators::generate_random_graph;
use crate::graph::traits::Graph;
use crate::measure::{measure_graph, RunRecord};
use crate::web::models::*;
use crate::Error;

type WeightedGraph = DirectedGraph<usize, OrderedFloat<f64>>;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub max_sessions: usize,
}

impl AppState {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions,
        }
    }

    fn lock_sessions(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, ApiError> {
        self.sessions.lock().map_err(|_| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "session_store_poisoned",
                "Session store is unavailable".to_string(),
            )
        })
    }

    fn session_graph(&self, session_id: &Uuid) -> Result<WebGraph, ApiError> {
        let sessions = self.lock_sessions()?;
        sessions
            .get(session_id)
            .map(|session| session.graph.clone())
            .ok_or_else(session_not_found)
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs/generate", post(generate_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/algorithms/run/:session_id", post(run_algorithm))
        .route("/api/algorithms/compare/:session_id", post(compare_algorithms))
        .route("/api/benchmark", post(run_benchmark))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:session_id", get(get_session))
        .route("/api/health", get(health_check))
}

/// Generate a new graph
pub async fn generate_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphGenerationRequest>,
) -> Result<Json<Session>, ApiError> {
    let mut rng = make_rng(request.seed);
    let graph = generate_random_graph(
        request.node_count,
        request.weight_range,
        request.density.resolve(request.node_count),
        None,
        &mut rng,
    )
    .map_err(map_library_error)?;

    let session = Session::new(convert_graph_to_web(&graph));

    {
        let mut sessions = state.lock_sessions()?;
        if sessions.len() >= state.max_sessions {
            return Err(api_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "too_many_sessions",
                format!("Session limit of {} reached", state.max_sessions),
            ));
        }
        sessions.insert(session.id, session.clone());
    }

    info!(
        "Session {} created with {} nodes and {} edges",
        session.id,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(Json(session))
}

/// Get graph data for a session
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WebGraph>, ApiError> {
    state.session_graph(&session_id).map(Json)
}

/// Run one strategy on a session's graph
pub async fn run_algorithm(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AlgorithmRequest>,
) -> Result<Json<AlgorithmResponse>, ApiError> {
    let graph = convert_web_graph_to_rust(&state.session_graph(&session_id)?)?;
    let response = run_blocking(move || {
        execute(&graph, request.strategy, request.source, request.target)
    })
    .await?;

    {
        let mut sessions = state.lock_sessions()?;
        if let Some(session) = sessions.get_mut(&session_id) {
            session.last_result = Some(response.clone());
        }
    }

    Ok(Json(response))
}

/// Run both strategies on the same graph and source
pub async fn compare_algorithms(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, ApiError> {
    let graph = convert_web_graph_to_rust(&state.session_graph(&session_id)?)?;
    let (naive, heap) = run_blocking(move || {
        let naive = execute(&graph, Strategy::Naive, request.source, request.target)?;
        let heap = execute(&graph, Strategy::Heap, request.source, request.target)?;
        Ok((naive, heap))
    })
    .await?;
    let distances_match = naive.distances == heap.distances;

    Ok(Json(CompareResponse {
        naive,
        heap,
        distances_match,
    }))
}

/// Measure both strategies on freshly generated graphs
pub async fn run_benchmark(
    State(_state): State<AppState>,
    Json(request): Json<BenchmarkRequest>,
) -> Result<Json<Vec<RunRecord>>, ApiError> {
    let records =
        run_blocking(move || benchmark_records(&request).map_err(map_library_error)).await?;

    Ok(Json(records))
}

/// List all active sessions
pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<Vec<Uuid>>, ApiError> {
    let sessions = state.lock_sessions()?;
    Ok(Json(sessions.keys().cloned().collect()))
}

/// Get session information
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Session>, ApiError> {
    let sessions = state.lock_sessions()?;
    sessions
        .get(&session_id)
        .cloned()
        .map(Json)
        .ok_or_else(session_not_found)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// Helper functions

fn api_error(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
            details: None,
        }),
    )
}

fn session_not_found() -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        "session_not_found",
        "Session not found".to_string(),
    )
}

fn map_library_error(err: Error) -> ApiError {
    let (status, code) = match &err {
        Error::UnknownNode(_) => (StatusCode::BAD_REQUEST, "unknown_node"),
        Error::DuplicateNode(_) => (StatusCode::BAD_REQUEST, "duplicate_node"),
        Error::InvalidWeight { .. } => (StatusCode::BAD_REQUEST, "invalid_weight"),
        Error::Config(_) => (StatusCode::BAD_REQUEST, "invalid_parameters"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "algorithm_execution_failed"),
    };
    api_error(status, code, err.to_string())
}

fn benchmark_records(request: &BenchmarkRequest) -> crate::Result<Vec<RunRecord>> {
    let mut rng = make_rng(request.seed);
    let mut records = Vec::new();
    for (i, density) in request.densities.iter().enumerate() {
        for &n in &request.node_counts {
            if n == 0 {
                continue;
            }
            for k in 0..request.graphs_per_size {
                let graph =
                    generate_random_graph(n, request.weight_range, density.resolve(n), None, &mut rng)?;
                let name = format!("density_{}/graph_{}_{}", i, n, k);
                records.push(measure_graph(&name, &graph, 0)?);
            }
        }
    }
    Ok(records)
}

/// Runs CPU-bound work off the async workers
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|err| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "algorithm_execution_failed",
            format!("Algorithm task failed: {}", err),
        )
    })?
}

fn execute(
    graph: &WeightedGraph,
    strategy: Strategy,
    source: usize,
    target: Option<usize>,
) -> Result<AlgorithmResponse, ApiError> {
    let source_slot = graph.index_of(&source).map_err(map_library_error)?;
    let target_slot = match target {
        Some(target) => Some(graph.index_of(&target).map_err(map_library_error)?),
        None => None,
    };

    let start_time = Instant::now();
    let result = strategy
        .run::<OrderedFloat<f64>, WeightedGraph>(graph, source_slot)
        .map_err(map_library_error)?;
    let execution_time = start_time.elapsed();

    Ok(build_response(
        graph,
        &result,
        execution_time.as_secs_f64() * 1000.0,
        target_slot,
    ))
}

/// Translates slot-indexed tables back to node ids
fn build_response(
    graph: &WeightedGraph,
    result: &RunResult<OrderedFloat<f64>>,
    execution_time_ms: f64,
    target_slot: Option<usize>,
) -> AlgorithmResponse {
    let ids = graph.nodes();
    let distances = result
        .distances
        .iter()
        .enumerate()
        .filter(|(_, distance)| distance.is_finite())
        .map(|(slot, distance)| (ids[slot], distance.into_inner()))
        .collect();
    let predecessors = result
        .predecessors
        .iter()
        .enumerate()
        .map(|(slot, parent)| (ids[slot], parent.map(|p| ids[p])))
        .collect();

    AlgorithmResponse {
        execution_id: Uuid::new_v4(),
        strategy: result.metadata.strategy,
        source: ids[result.source],
        execution_time_ms,
        node_count: result.metadata.node_count,
        edge_count: result.metadata.edge_count,
        reachable_count: result.reachable_count(),
        distances,
        predecessors,
        finalization_order: result.finalization_order.iter().map(|&slot| ids[slot]).collect(),
        counts: result.counts,
        path: target_slot
            .and_then(|target| result.path_to(target))
            .map(|path| path.into_iter().map(|slot| ids[slot]).collect()),
    }
}

fn convert_graph_to_web(graph: &WeightedGraph) -> WebGraph {
    let nodes = graph
        .nodes()
        .iter()
        .map(|&id| WebNode {
            id,
            label: format!("Node {}", id),
        })
        .collect();

    let links = graph
        .edges()
        .map(|(from, edge)| WebEdge {
            source: graph.nodes()[from],
            target: graph.nodes()[edge.to],
            weight: edge.weight.into_inner(),
        })
        .collect();

    WebGraph { nodes, links }
}

fn convert_web_graph_to_rust(web_graph: &WebGraph) -> Result<WeightedGraph, ApiError> {
    let mut graph = DirectedGraph::with_capacity(web_graph.nodes.len());
    for node in &web_graph.nodes {
        graph.add_node(node.id).map_err(map_library_error)?;
    }
    for edge in &web_graph.links {
        graph
            .add_edge(&edge.source, &edge.target, OrderedFloat(edge.weight))
            .map_err(map_library_error)?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation_request(node_count: usize) -> GraphGenerationRequest {
        serde_json::from_value(serde_json::json!({
            "node_count": node_count,
            "density": { "kind": "fixed", "value": 0.3 },
            "seed": 12
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_then_compare() {
        let state = AppState::new(4);
        let Json(session) = generate_graph(State(state.clone()), Json(generation_request(30)))
            .await
            .unwrap();
        assert_eq!(session.graph.nodes.len(), 30);

        let Json(graph) = get_graph(State(state.clone()), Path(session.id)).await.unwrap();
        assert_eq!(graph.links.len(), session.graph.links.len());

        let request = CompareRequest {
            source: 0,
            target: Some(29),
        };
        let Json(compare) = compare_algorithms(State(state.clone()), Path(session.id), Json(request))
            .await
            .unwrap();
        assert!(compare.distances_match);
        assert_eq!(compare.naive.distances.get(&0), Some(&0.0));
        assert_eq!(compare.naive.predecessors, compare.heap.predecessors);
        assert_eq!(compare.naive.path, compare.heap.path);
        assert_eq!(compare.naive.finalization_order, compare.heap.finalization_order);
    }

    #[tokio::test]
    async fn test_run_stores_last_result() {
        let state = AppState::new(4);
        let Json(session) = generate_graph(State(state.clone()), Json(generation_request(10)))
            .await
            .unwrap();

        let request = AlgorithmRequest {
            strategy: Strategy::Naive,
            source: 3,
            target: None,
        };
        let Json(response) = run_algorithm(State(state.clone()), Path(session.id), Json(request))
            .await
            .unwrap();
        assert_eq!(response.source, 3);
        assert_eq!(response.counts.extractions as usize, response.reachable_count);

        let Json(stored) = get_session(State(state), Path(session.id)).await.unwrap();
        let last = stored.last_result.unwrap();
        assert_eq!(last.execution_id, response.execution_id);
    }

    #[tokio::test]
    async fn test_errors_map_to_status_codes() {
        let state = AppState::new(1);
        let missing = get_graph(State(state.clone()), Path(Uuid::new_v4())).await.unwrap_err();
        assert_eq!(missing.0, StatusCode::NOT_FOUND);

        let Json(session) = generate_graph(State(state.clone()), Json(generation_request(5)))
            .await
            .unwrap();
        let request = AlgorithmRequest {
            strategy: Strategy::Heap,
            source: 99,
            target: None,
        };
        let unknown = run_algorithm(State(state.clone()), Path(session.id), Json(request))
            .await
            .unwrap_err();
        assert_eq!(unknown.0, StatusCode::BAD_REQUEST);
        assert_eq!(unknown.1.error, "unknown_node");

        let full = generate_graph(State(state), Json(generation_request(5))).await.unwrap_err();
        assert_eq!(full.0, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_benchmark_measures_every_size() {
        let request: BenchmarkRequest = serde_json::from_value(serde_json::json!({
            "node_counts": [0, 8, 16],
            "densities": [{ "kind": "per_node", "edges": 2.0 }],
            "graphs_per_size": 2,
            "seed": 3
        }))
        .unwrap();

        let Json(records) = run_benchmark(State(AppState::new(1)), Json(request)).await.unwrap();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.n == 8 || r.n == 16));
        assert_eq!(records[0].graph, "density_0/graph_8_0");
    }
}
