#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque};

use anyhow::{Result, anyhow};
use serde_json::{Value, json};
use smartschool::{Response, Session};

/// What the scripted session answers for one request.
pub enum Reply {
    Body(Value),
    Raw(&'static str),
    Empty,
    Missing,
    Fail(&'static str),
}

/// Session double that replays queued replies and records requested paths.
#[derive(Default)]
pub struct ScriptedSession {
    replies:  RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedSession {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies:  RefCell::new(replies.into_iter().collect()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Session for ScriptedSession {
    fn get(&self, path: &str) -> Result<Option<Response>> {
        self.requests.borrow_mut().push(path.to_string());
        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Body(value)) => Ok(Some(Response::new(value.to_string()))),
            Some(Reply::Raw(body)) => Ok(Some(Response::new(body))),
            Some(Reply::Empty) => Ok(Some(Response::default())),
            Some(Reply::Missing) => Ok(None),
            Some(Reply::Fail(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("unexpected request for {path}")),
        }
    }
}

pub fn page_path(page_nr: usize) -> String {
    format!("/results/api/v1/evaluations/?pageNumber={page_nr}&itemsOnPage=50")
}

pub fn component(name: &str) -> Value {
    json!({"id": name.len(), "name": name, "abbreviation": &name[..2]})
}

/// A raw listing object as the portal sends it.
pub fn raw_result(id: usize, component: Option<Value>) -> Value {
    let mut raw = json!({
        "identifier": format!("49_10880_0_normal_{id}"),
        "type": "normal",
        "name": format!("Toets {id}"),
        "graphic": {"type": "percentage", "color": "olive", "value": 70, "description": "7/10"},
        "date": "2023-10-02T00:00:00+02:00",
        "courses": [{"id": 3, "name": "Wiskunde", "teachers": []}],
        "feedbacks": [],
        "doesCount": true,
    });
    if let Some(component) = component {
        raw["component"] = component;
    }
    raw
}

/// A page of `len` raw objects without a component, numbered from `first_id`.
pub fn page(first_id: usize, len: usize) -> Value {
    Value::Array(
        (first_id..first_id + len)
            .map(|id| raw_result(id, None))
            .collect(),
    )
}
