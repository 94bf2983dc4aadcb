//! In-memory Wekan server for integration tests.
//!
//! A single catch-all wiremock mock routes every request to [`FakeWekan`],
//! which keeps boards, lists, swimlanes, cards and users as JSON documents
//! shaped like the real server's responses.

#![allow(dead_code)]

use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use wekan_client::WekanClient;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TOKEN: &str = "fake-session-token";
pub const ADMIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "Password1";

const TIMESTAMP: &str = "2024-05-01T09:30:00.000Z";
const DEFAULT_LABEL_COLORS: [&str; 6] = ["green", "yellow", "orange", "red", "purple", "blue"];

#[derive(Default)]
struct State {
    next_id: u64,
    users: Vec<Value>,
    passwords: HashMap<String, String>,
    boards: Vec<Value>,
    lists: Vec<Value>,
    swimlanes: Vec<Value>,
    cards: Vec<Value>,
    failing_card_titles: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeWekan {
    state: Arc<Mutex<State>>,
}

pub struct TestServer {
    pub server: MockServer,
    pub fake: FakeWekan,
    pub admin_id: String,
}

impl TestServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let fake = FakeWekan::default();
        let admin_id = fake.add_user(ADMIN, ADMIN_PASSWORD);
        Mock::given(any())
            .respond_with(fake.clone())
            .mount(&server)
            .await;
        Self {
            server,
            fake,
            admin_id,
        }
    }

    pub async fn login(&self) -> WekanClient {
        WekanClient::login(&self.server.uri(), ADMIN, ADMIN_PASSWORD)
            .await
            .expect("admin login")
    }
}

fn ok(value: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(value)
}

fn missing(what: &str, id: &str) -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_string(format!("{} {} not found", what, id))
}

fn id_and_title(items: Vec<&Value>) -> Value {
    Value::Array(
        items
            .into_iter()
            .map(|item| json!({"_id": item["_id"], "title": item["title"]}))
            .collect(),
    )
}

fn member(user_id: &str, is_admin: bool) -> Value {
    json!({
        "userId": user_id,
        "isAdmin": is_admin,
        "isActive": true,
        "isNoComments": false,
        "isCommentOnly": false,
    })
}

fn flag(body: &Value, key: &str, default: bool) -> bool {
    body.get(key).and_then(Value::as_bool).unwrap_or(default)
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn board(&self, id: &str) -> Option<&Value> {
        self.boards.iter().find(|board| board["_id"] == id)
    }

    fn board_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.boards.iter_mut().find(|board| board["_id"] == id)
    }

    fn insert_user(&mut self, username: &str, email: &str, password: &str) -> String {
        let id = self.next_id("user");
        self.users.push(json!({
            "_id": id,
            "username": username,
            "emails": [{"address": email, "verified": false}],
            "isAdmin": false,
            "createdAt": TIMESTAMP,
        }));
        self.passwords.insert(username.to_string(), password.to_string());
        id
    }

    fn insert_board(&mut self, title: &str, members: Vec<Value>, permission: &str, color: &str) -> String {
        let id = self.next_id("board");
        let labels: Vec<Value> = DEFAULT_LABEL_COLORS
            .iter()
            .enumerate()
            .map(|(i, color)| json!({"_id": format!("{}-label-{}", id, i), "name": "", "color": color}))
            .collect();
        self.boards.push(json!({
            "_id": id,
            "title": title,
            "slug": title.to_lowercase().replace(' ', "-"),
            "archived": false,
            "createdAt": TIMESTAMP,
            "modifiedAt": TIMESTAMP,
            "stars": 0,
            "labels": labels,
            "members": members,
            "permission": permission,
            "color": color,
            "description": null,
            "allowsSubtasks": true,
            "presentParentTask": "no-parent",
            "spentTime": 0,
            "isOvertime": false,
            "type": "board",
        }));
        id
    }

    fn insert_swimlane(&mut self, board_id: &str, title: &str) -> String {
        let id = self.next_id("swimlane");
        let sort = self.swimlanes.iter().filter(|s| s["boardId"] == board_id).count();
        self.swimlanes.push(json!({
            "_id": id,
            "title": title,
            "boardId": board_id,
            "archived": false,
            "createdAt": TIMESTAMP,
            "updatedAt": TIMESTAMP,
            "modifiedAt": TIMESTAMP,
            "sort": sort,
            "type": "swimlane",
        }));
        id
    }

    fn insert_list(&mut self, board_id: &str, title: &str) -> String {
        let id = self.next_id("list");
        let sort = self.lists.iter().filter(|l| l["boardId"] == board_id).count();
        self.lists.push(json!({
            "_id": id,
            "title": title,
            "boardId": board_id,
            "swimlaneId": "",
            "archived": false,
            "starred": false,
            "createdAt": TIMESTAMP,
            "updatedAt": TIMESTAMP,
            "modifiedAt": TIMESTAMP,
            "sort": sort,
            "wipLimit": {"value": 1, "enabled": false, "soft": false},
            "type": "list",
        }));
        id
    }

    fn insert_card(
        &mut self,
        board_id: &str,
        list_id: &str,
        title: &str,
        description: &str,
        author_id: &str,
        swimlane_id: &str,
    ) -> String {
        let id = self.next_id("card");
        let sort = self.cards.iter().filter(|c| c["listId"] == list_id).count();
        self.cards.push(json!({
            "_id": id,
            "title": title,
            "description": description,
            "boardId": board_id,
            "listId": list_id,
            "swimlaneId": swimlane_id,
            "authorId": author_id,
            "archived": false,
            "sort": sort,
            "type": "cardType-card",
        }));
        id
    }

    fn login(&self, body: &[u8]) -> ResponseTemplate {
        let form: HashMap<String, String> = url::form_urlencoded::parse(body).into_owned().collect();
        let username = form.get("username").map(String::as_str).unwrap_or_default();
        let password = form.get("password").map(String::as_str).unwrap_or_default();

        let accepted = self.passwords.get(username).map(String::as_str) == Some(password);
        match self.users.iter().find(|u| u["username"] == username) {
            Some(user) if accepted => ok(json!({
                "id": user["_id"],
                "token": TOKEN,
                "tokenExpires": "2099-01-01T00:00:00.000Z",
            })),
            _ => ResponseTemplate::new(400)
                .set_body_json(json!({"error": 400, "reason": "Incorrect password"})),
        }
    }

    fn route(&mut self, method: &str, segments: &[&str], body: &Value) -> ResponseTemplate {
        match (method, segments) {
            ("GET", ["api", "users"]) => ok(Value::Array(
                self.users
                    .iter()
                    .map(|u| json!({"_id": u["_id"], "username": u["username"]}))
                    .collect(),
            )),
            ("POST", ["api", "users"]) => {
                let username = body["username"].as_str().unwrap_or_default();
                if username.is_empty() {
                    return ok(json!({"error": "username is required"}));
                }
                let id = self.insert_user(
                    username,
                    body["email"].as_str().unwrap_or_default(),
                    body["password"].as_str().unwrap_or_default(),
                );
                ok(json!({"_id": id}))
            }
            ("GET", ["api", "users", user_id]) => {
                match self.users.iter().find(|u| u["_id"] == *user_id) {
                    Some(user) => ok(user.clone()),
                    None => missing("user", user_id),
                }
            }
            ("DELETE", ["api", "users", user_id]) => {
                let before = self.users.len();
                self.users.retain(|u| u["_id"] != *user_id);
                if self.users.len() == before {
                    return missing("user", user_id);
                }
                ok(json!({"_id": user_id}))
            }
            ("GET", ["api", "users", user_id, "boards"]) => ok(id_and_title(
                self.boards
                    .iter()
                    .filter(|board| {
                        board["members"]
                            .as_array()
                            .is_some_and(|members| members.iter().any(|m| m["userId"] == *user_id))
                    })
                    .collect(),
            )),
            ("GET", ["api", "boards"]) => ok(id_and_title(
                self.boards
                    .iter()
                    .filter(|board| board["permission"] == "public")
                    .collect(),
            )),
            ("POST", ["api", "boards"]) => {
                let owner = body["owner"].as_str().unwrap_or_default().to_string();
                let mut owner_member = member(&owner, flag(body, "isAdmin", true));
                owner_member["isActive"] = json!(flag(body, "isActive", true));
                owner_member["isNoComments"] = json!(flag(body, "isNoComments", false));
                owner_member["isCommentOnly"] = json!(flag(body, "isCommentOnly", false));

                let id = self.insert_board(
                    body["title"].as_str().unwrap_or_default(),
                    vec![owner_member],
                    body["permission"].as_str().unwrap_or("private"),
                    body["color"].as_str().unwrap_or("belize"),
                );
                let swimlane_id = self.insert_swimlane(&id, "Default");
                ok(json!({"_id": id, "defaultSwimlaneId": swimlane_id}))
            }
            ("GET", ["api", "boards", board_id]) => match self.board(board_id) {
                Some(board) => ok(board.clone()),
                None => missing("board", board_id),
            },
            ("DELETE", ["api", "boards", board_id]) => {
                self.boards.retain(|b| b["_id"] != *board_id);
                self.lists.retain(|l| l["boardId"] != *board_id);
                self.swimlanes.retain(|s| s["boardId"] != *board_id);
                self.cards.retain(|c| c["boardId"] != *board_id);
                ResponseTemplate::new(200)
            }
            ("GET", ["api", "boards", board_id, "lists"]) => {
                if self.board(board_id).is_none() {
                    return missing("board", board_id);
                }
                ok(id_and_title(
                    self.lists.iter().filter(|l| l["boardId"] == *board_id).collect(),
                ))
            }
            ("POST", ["api", "boards", board_id, "lists"]) => {
                if self.board(board_id).is_none() {
                    return missing("board", board_id);
                }
                let id = self.insert_list(board_id, body["title"].as_str().unwrap_or_default());
                ok(json!({"_id": id}))
            }
            ("GET", ["api", "boards", board_id, "lists", list_id]) => {
                match self
                    .lists
                    .iter()
                    .find(|l| l["_id"] == *list_id && l["boardId"] == *board_id)
                {
                    Some(list) => ok(list.clone()),
                    None => missing("list", list_id),
                }
            }
            ("DELETE", ["api", "boards", board_id, "lists", list_id]) => {
                let before = self.lists.len();
                self.lists
                    .retain(|l| !(l["_id"] == *list_id && l["boardId"] == *board_id));
                if self.lists.len() == before {
                    return missing("list", list_id);
                }
                self.cards.retain(|c| c["listId"] != *list_id);
                ok(json!({"_id": list_id}))
            }
            ("GET", ["api", "boards", board_id, "swimlanes"]) => ok(id_and_title(
                self.swimlanes
                    .iter()
                    .filter(|s| s["boardId"] == *board_id)
                    .collect(),
            )),
            ("POST", ["api", "boards", board_id, "swimlanes"]) => {
                if self.board(board_id).is_none() {
                    return missing("board", board_id);
                }
                let id = self.insert_swimlane(board_id, body["title"].as_str().unwrap_or_default());
                ok(json!({"_id": id}))
            }
            ("GET", ["api", "boards", board_id, "swimlanes", swimlane_id]) => {
                match self
                    .swimlanes
                    .iter()
                    .find(|s| s["_id"] == *swimlane_id && s["boardId"] == *board_id)
                {
                    Some(swimlane) => ok(swimlane.clone()),
                    None => missing("swimlane", swimlane_id),
                }
            }
            ("GET", ["api", "boards", board_id, "lists", list_id, "cards"]) => ok(Value::Array(
                self.cards
                    .iter()
                    .filter(|c| c["boardId"] == *board_id && c["listId"] == *list_id)
                    .map(|c| json!({"_id": c["_id"], "title": c["title"], "description": c["description"]}))
                    .collect(),
            )),
            ("POST", ["api", "boards", board_id, "lists", list_id, "cards"]) => {
                let title = body["title"].as_str().unwrap_or_default();
                if self.failing_card_titles.iter().any(|t| t == title) {
                    return ResponseTemplate::new(500).set_body_string("card storage failed");
                }
                let author = body["authorId"].as_str().unwrap_or_default();
                let swimlane = body["swimlaneId"].as_str().unwrap_or_default();
                if author.is_empty() || swimlane.is_empty() {
                    return ok(json!({"error": "authorId and swimlaneId are required"}));
                }
                let id = self.insert_card(
                    board_id,
                    list_id,
                    title,
                    body["description"].as_str().unwrap_or_default(),
                    author,
                    swimlane,
                );
                ok(json!({"_id": id}))
            }
            ("GET", ["api", "boards", board_id, "lists", list_id, "cards", card_id]) => {
                match self.cards.iter().find(|c| {
                    c["_id"] == *card_id && c["listId"] == *list_id && c["boardId"] == *board_id
                }) {
                    Some(card) => ok(card.clone()),
                    None => missing("card", card_id),
                }
            }
            ("POST", ["api", "boards", board_id, "members", user_id]) => {
                let Some(board) = self.board_mut(board_id) else {
                    return missing("board", board_id);
                };
                let Some(member) = board["members"]
                    .as_array_mut()
                    .and_then(|members| members.iter_mut().find(|m| m["userId"] == *user_id))
                else {
                    return ok(json!({"error": "user is not a member of this board"}));
                };
                member["isAdmin"] = json!(flag(body, "isAdmin", false));
                member["isNoComments"] = json!(flag(body, "isNoComments", false));
                member["isCommentOnly"] = json!(flag(body, "isCommentOnly", false));
                ok(json!({"_id": board_id}))
            }
            ("POST", ["api", "boards", board_id, "members", user_id, "add"]) => {
                let mut added = member(user_id, flag(body, "isAdmin", false));
                added["isNoComments"] = json!(flag(body, "isNoComments", false));
                added["isCommentOnly"] = json!(flag(body, "isCommentOnly", false));
                let Some(board) = self.board_mut(board_id) else {
                    return missing("board", board_id);
                };
                if let Some(members) = board["members"].as_array_mut() {
                    members.retain(|m| m["userId"] != *user_id);
                    members.push(added);
                }
                ok(json!({"_id": board_id}))
            }
            _ => ResponseTemplate::new(404).set_body_string("no such route"),
        }
    }
}

impl Respond for FakeWekan {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock();
        let path = request.url.path().to_string();
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let method = request.method.as_str();

        if method == "POST" && segments == ["users", "login"] {
            return state.login(&request.body);
        }

        let expected = format!("Bearer {}", TOKEN);
        let authorized = request
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            == Some(expected.as_str());
        if !authorized {
            return ResponseTemplate::new(401).set_body_string("Unauthorized");
        }

        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        state.route(method, &segments, &body)
    }
}

impl FakeWekan {
    pub fn add_user(&self, username: &str, password: &str) -> String {
        self.state
            .lock()
            .insert_user(username, &format!("{}@example.com", username), password)
    }

    /// A private `belize` board owned by `owner_id` with one swimlane, as the
    /// server creates them.
    pub fn add_board(&self, title: &str, owner_id: &str) -> String {
        let mut state = self.state.lock();
        let id = state.insert_board(title, vec![member(owner_id, true)], "private", "belize");
        state.insert_swimlane(&id, "Default");
        id
    }

    /// A board with no swimlanes at all.
    pub fn add_bare_board(&self, title: &str, owner_id: &str) -> String {
        self.state
            .lock()
            .insert_board(title, vec![member(owner_id, true)], "private", "belize")
    }

    pub fn update_board(&self, board_id: &str, update: impl FnOnce(&mut Value)) {
        let mut state = self.state.lock();
        let board = state.board_mut(board_id).expect("board exists");
        update(board);
    }

    pub fn add_member(&self, board_id: &str, user_id: &str, is_admin: bool) {
        self.update_board(board_id, |board| {
            board["members"]
                .as_array_mut()
                .expect("members array")
                .push(member(user_id, is_admin));
        });
    }

    pub fn add_list(&self, board_id: &str, title: &str) -> String {
        self.state.lock().insert_list(board_id, title)
    }

    pub fn add_card(&self, board_id: &str, list_id: &str, title: &str, description: &str) -> String {
        let mut state = self.state.lock();
        let author = state
            .board(board_id)
            .and_then(|b| b["members"][0]["userId"].as_str().map(str::to_string))
            .unwrap_or_default();
        let swimlane = state
            .swimlanes
            .iter()
            .find(|s| s["boardId"] == board_id)
            .and_then(|s| s["_id"].as_str().map(str::to_string))
            .unwrap_or_default();
        state.insert_card(board_id, list_id, title, description, &author, &swimlane)
    }

    /// Card creation with this title answers 500.
    pub fn fail_cards_titled(&self, title: &str) {
        self.state.lock().failing_card_titles.push(title.to_string());
    }

    pub fn board(&self, board_id: &str) -> Option<Value> {
        self.state.lock().board(board_id).cloned()
    }

    pub fn board_ids_titled(&self, title: &str) -> Vec<String> {
        self.state
            .lock()
            .boards
            .iter()
            .filter(|b| b["title"] == title)
            .filter_map(|b| b["_id"].as_str().map(str::to_string))
            .collect()
    }

    pub fn lists_of(&self, board_id: &str) -> Vec<Value> {
        self.state
            .lock()
            .lists
            .iter()
            .filter(|l| l["boardId"] == board_id)
            .cloned()
            .collect()
    }

    pub fn cards_of(&self, list_id: &str) -> Vec<Value> {
        self.state
            .lock()
            .cards
            .iter()
            .filter(|c| c["listId"] == list_id)
            .cloned()
            .collect()
    }

    pub fn user_exists(&self, user_id: &str) -> bool {
        self.state.lock().users.iter().any(|u| u["_id"] == user_id)
    }
}
