//! Single binary web server: JSON API over one tournament document, saved after every change.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, DATA_DIR (default "data").

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use pickleball_bracket_web::{
    clear_result, export::standings_csv, generate_finals, generate_group_matches,
    generate_semi_finals, group_standings, pair_athletes, record_score, record_sets,
    storage::{load_tournament, save_tournament, FileStore, LoadOutcome},
    AthleteId, Group, MatchId, SetScore, TeamId, Tournament, TournamentConfig, TournamentError,
};
use serde::Deserialize;
use std::sync::RwLock;

/// Roster created when nothing is saved yet: 16 athletes, 8 teams, two groups of 4.
const DEFAULT_ROSTER_SIZE: usize = 16;

/// The tournament document and where it is saved.
struct AppState {
    tournament: Tournament,
    store: FileStore,
}

type SharedState = Data<RwLock<AppState>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    score_a: u32,
    score_b: u32,
}

#[derive(Deserialize)]
struct SetsBody {
    sets: Vec<SetScore>,
}

#[derive(Deserialize)]
struct AthletePath {
    athlete_id: AthleteId,
}

#[derive(Deserialize)]
struct TeamPath {
    team_id: TeamId,
}

#[derive(Deserialize)]
struct MatchPath {
    match_id: MatchId,
}

/// Path segment: group letter (e.g. /api/standings/A)
#[derive(Deserialize)]
struct GroupPath {
    group: Group,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `op` on the document; on success save it and return it.
fn mutate<F>(state: &SharedState, op: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if let Err(e) = op(&mut g.tournament) {
        return error_response(&e);
    }
    let AppState { tournament, store } = &mut *g;
    if let Err(e) = save_tournament(store, tournament) {
        log::error!("Failed to save tournament: {}", e);
        return HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }));
    }
    HttpResponse::Ok().json(&*tournament)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pickleball-bracket-web",
    })
}

#[get("/api/tournament")]
async fn api_get_tournament(state: SharedState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(&g.tournament),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Wipe athletes, teams and matches (scoring rules are kept).
#[post("/api/tournament/reset")]
async fn api_reset(state: SharedState) -> HttpResponse {
    mutate(&state, |t| {
        t.reset();
        Ok(())
    })
}

#[put("/api/tournament/config")]
async fn api_set_config(state: SharedState, body: Json<TournamentConfig>) -> HttpResponse {
    let config = body.into_inner();
    mutate(&state, move |t| t.set_config(config))
}

#[post("/api/athletes")]
async fn api_add_athlete(state: SharedState, body: Json<NameBody>) -> HttpResponse {
    mutate(&state, |t| t.add_athlete(body.name.as_str()).map(|_| ()))
}

#[put("/api/athletes/{athlete_id}")]
async fn api_rename_athlete(state: SharedState, path: Path<AthletePath>, body: Json<NameBody>) -> HttpResponse {
    mutate(&state, |t| t.rename_athlete(path.athlete_id, &body.name))
}

#[delete("/api/athletes/{athlete_id}")]
async fn api_remove_athlete(state: SharedState, path: Path<AthletePath>) -> HttpResponse {
    mutate(&state, |t| t.remove_athlete(path.athlete_id))
}

/// Draw new random teams and groups (discards every team and match).
#[post("/api/teams/shuffle")]
async fn api_shuffle_teams(state: SharedState) -> HttpResponse {
    mutate(&state, pair_athletes)
}

#[put("/api/teams/{team_id}")]
async fn api_rename_team(state: SharedState, path: Path<TeamPath>, body: Json<NameBody>) -> HttpResponse {
    mutate(&state, |t| t.rename_team(path.team_id, &body.name))
}

/// Round-robin schedule for both groups (replaces all matches).
#[post("/api/matches/generate")]
async fn api_generate_matches(state: SharedState) -> HttpResponse {
    mutate(&state, generate_group_matches)
}

#[put("/api/matches/{match_id}/score")]
async fn api_record_score(state: SharedState, path: Path<MatchPath>, body: Json<ScoreBody>) -> HttpResponse {
    mutate(&state, |t| record_score(t, path.match_id, body.score_a, body.score_b))
}

#[put("/api/matches/{match_id}/sets")]
async fn api_record_sets(state: SharedState, path: Path<MatchPath>, body: Json<SetsBody>) -> HttpResponse {
    mutate(&state, |t| record_sets(t, path.match_id, &body.sets))
}

#[delete("/api/matches/{match_id}/result")]
async fn api_clear_result(state: SharedState, path: Path<MatchPath>) -> HttpResponse {
    mutate(&state, |t| clear_result(t, path.match_id))
}

#[get("/api/standings/{group}")]
async fn api_standings(state: SharedState, path: Path<GroupPath>) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(group_standings(&g.tournament, path.group)),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[get("/api/standings/{group}/csv")]
async fn api_standings_csv(state: SharedState, path: Path<GroupPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match standings_csv(&group_standings(&g.tournament, path.group)) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(body),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

/// A1 vs B2 and B1 vs A2 (all group matches must be completed).
#[post("/api/knockout/semi-finals")]
async fn api_semi_finals(state: SharedState) -> HttpResponse {
    mutate(&state, generate_semi_finals)
}

/// Final and third-place match (both semifinals must be completed).
#[post("/api/knockout/finals")]
async fn api_finals(state: SharedState) -> HttpResponse {
    mutate(&state, generate_finals)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

/// Saved tournament if there is a usable one, otherwise a fresh roster with drawn teams.
fn initial_tournament(store: &FileStore) -> Tournament {
    let loaded = match load_tournament(store) {
        Ok(LoadOutcome::Empty) => None,
        Ok(outcome) => outcome.into_tournament(),
        Err(e) => {
            log::warn!("Could not read saved tournament, starting fresh: {}", e);
            None
        }
    };
    if let Some(t) = loaded {
        log::info!("Loaded tournament {} ({} teams, {} matches)", t.id, t.teams.len(), t.matches.len());
        return t;
    }
    let names = (1..=DEFAULT_ROSTER_SIZE).map(|i| format!("Athlete {i}"));
    let mut t = Tournament::with_athletes(names, TournamentConfig::default());
    if let Err(e) = pair_athletes(&mut t) {
        log::warn!("Could not draw initial teams: {}", e);
    }
    t
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| default_data_dir());

    let store = FileStore::open(&data_dir)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let tournament = initial_tournament(&store);
    let state = Data::new(RwLock::new(AppState { tournament, store }));

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{} (data in {})", bind.0, bind.1, data_dir);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_tournament)
            .service(api_reset)
            .service(api_set_config)
            .service(api_add_athlete)
            .service(api_rename_athlete)
            .service(api_remove_athlete)
            .service(api_shuffle_teams)
            .service(api_rename_team)
            .service(api_generate_matches)
            .service(api_record_score)
            .service(api_record_sets)
            .service(api_clear_result)
            .service(api_standings_csv)
            .service(api_standings)
            .service(api_semi_finals)
            .service(api_finals)
    })
    .bind(bind)?
    .run()
    .await
}
