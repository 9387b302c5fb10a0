// HTTP handler bindings for the bot endpoints
//
// Thin wrappers that bind Rocket routes to the Bot's core logic methods.
// Handlers deserialize the snapshot, delegate, and serialize the response;
// a snapshot that violates the engine's preconditions answers 400.

use rocket::http::Status;
use rocket::response::status::BadRequest;
use rocket::serde::json::Json;
use serde_json::Value;

use crate::bot::Bot;
use crate::types::GameState;

/// GET / endpoint
/// Returns bot metadata and appearance configuration
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /start endpoint
/// Called when a game starts - seeds this game's agent memory
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(bot: &rocket::State<Bot>, start_req: Json<GameState>) -> Status {
    bot.start(&start_req);

    Status::Ok
}

/// POST /move endpoint
/// Called each tick to compute and return the next move
#[post("/move", format = "json", data = "<move_req>")]
pub async fn get_move(
    bot: &rocket::State<Bot>,
    move_req: Json<GameState>,
) -> Result<Json<Value>, BadRequest<String>> {
    bot.get_move(&move_req).map(Json).map_err(BadRequest)
}

/// POST /end endpoint
/// Called when a game ends - clears this game's agent memory
#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Json<GameState>) -> Status {
    bot.end(&end_req);

    Status::Ok
}
