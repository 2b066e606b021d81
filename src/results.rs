#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Evaluation results: the paginated listing and the per-result detail.
//!
//! ```no_run
//! use smartschool::{HttpSession, Results};
//!
//! let session = HttpSession::from_env()?;
//! for result in &Results::new(&session) {
//!     println!("{}", result?.name);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::iter::FusedIterator;

use serde_json::Value;

use crate::{
    constants::{
        NO_GRADE_GRAPHIC_TYPE, NO_GRADE_SENTINEL, NO_GRADE_VALUE, RESULTS_PER_PAGE,
        result_detail_path, results_page_path,
    },
    error::{Result, SmartschoolError},
    objects::{ResultWithDetails, ResultWithoutDetails},
    session::{Response, Session},
};

/// Fetches `path` and returns the response, failing with a download error
/// carrying `message` when there is no response or its body is empty.
fn download<S: Session + ?Sized>(session: &S, path: &str, message: &str) -> Result<Response> {
    match session.get(path)? {
        Some(response) if !response.is_empty() => Ok(response),
        _ => {
            tracing::warn!("No JSON payload for {path}");
            Err(SmartschoolError::download(message))
        }
    }
}

/// Repairs one raw listing object in place.
///
/// A missing or null `component` is replaced by `last_component`; a present
/// one becomes the new `last_component`. The no-grade placeholder in
/// `graphic.value` becomes `-1` with `graphic.type` set to `"percentage"`.
pub fn repair_result(raw: &mut Value, last_component: &mut Option<Value>) {
    let Some(obj) = raw.as_object_mut() else {
        return;
    };

    match obj.get("component") {
        Some(component) if !component.is_null() => *last_component = Some(component.clone()),
        _ => {
            tracing::debug!("Carrying component forward");
            obj.insert(
                "component".to_string(),
                last_component.clone().unwrap_or(Value::Null),
            );
        }
    }

    if let Some(graphic) = obj.get_mut("graphic").and_then(Value::as_object_mut)
        && graphic.get("value").and_then(Value::as_str) == Some(NO_GRADE_SENTINEL)
    {
        tracing::debug!("Rewriting no-grade placeholder");
        graphic.insert("value".to_string(), Value::from(NO_GRADE_VALUE));
        graphic.insert("type".to_string(), Value::from(NO_GRADE_GRAPHIC_TYPE));
    }
}

/// All evaluations of the logged-in student, in the order the portal lists
/// them.
///
/// Iterating fetches pages of [`RESULTS_PER_PAGE`] results on demand, starting
/// at page 1, until a page comes back short. Each iteration starts over.
#[derive(Debug)]
pub struct Results<'s, S: Session + ?Sized> {
    /// Session used for every page request.
    session: &'s S,
}

impl<'s, S: Session + ?Sized> Results<'s, S> {
    /// Creates a listing over the given session.
    pub fn new(session: &'s S) -> Self {
        Self { session }
    }

    /// Starts a fresh pass over the listing.
    pub fn iter(&self) -> ResultsIter<'s, S> {
        ResultsIter {
            session:        self.session,
            next_page:      1,
            page:           Vec::new().into_iter(),
            last_page:      false,
            last_component: None,
            finished:       false,
        }
    }
}

impl<'s, S: Session + ?Sized> IntoIterator for &Results<'s, S> {
    type IntoIter = ResultsIter<'s, S>;
    type Item = Result<ResultWithoutDetails>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass over the listing, see [`Results`].
///
/// The first error ends the pass.
#[derive(Debug)]
pub struct ResultsIter<'s, S: Session + ?Sized> {
    /// Session used for every page request.
    session:        &'s S,
    /// Page number of the next request.
    next_page:      usize,
    /// Raw objects of the current page not yet yielded.
    page:           std::vec::IntoIter<Value>,
    /// Whether the current page was short, i.e. the last one.
    last_page:      bool,
    /// Most recent non-null component seen in this pass.
    last_component: Option<Value>,
    /// Set once the listing is exhausted or an error was yielded.
    finished:       bool,
}

impl<S: Session + ?Sized> ResultsIter<'_, S> {
    /// Requests the next page and decodes it into raw objects.
    fn fetch_page(&mut self) -> Result<Vec<Value>> {
        let page_nr = self.next_page;
        let response = download(
            self.session,
            &results_page_path(page_nr),
            "No JSON was returned for the results?!",
        )?;
        let raw: Vec<Value> = response.json()?;

        tracing::debug!("Results page {page_nr} holds {} entries", raw.len());
        self.next_page += 1;
        Ok(raw)
    }

    /// Marks the pass as finished and hands the error back.
    fn fail(&mut self, err: SmartschoolError) -> Option<Result<ResultWithoutDetails>> {
        self.finished = true;
        Some(Err(err))
    }
}

impl<S: Session + ?Sized> Iterator for ResultsIter<'_, S> {
    type Item = Result<ResultWithoutDetails>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(mut raw) = self.page.next() {
                repair_result(&mut raw, &mut self.last_component);
                return match serde_json::from_value(raw) {
                    Ok(result) => Some(Ok(result)),
                    Err(err) => self.fail(err.into()),
                };
            }

            if self.last_page {
                self.finished = true;
                return None;
            }

            match self.fetch_page() {
                Ok(raw) => {
                    self.last_page = raw.len() < RESULTS_PER_PAGE;
                    self.page = raw.into_iter();
                }
                Err(err) => return self.fail(err),
            }
        }
    }
}

impl<S: Session + ?Sized> FusedIterator for ResultsIter<'_, S> {}

/// Full details of a single evaluation.
#[derive(Debug)]
pub struct ResultDetail<'s, S: Session + ?Sized> {
    /// Session used for the request.
    session:   &'s S,
    /// Identifier as found in [`ResultWithoutDetails::identifier`].
    result_id: String,
}

impl<'s, S: Session + ?Sized> ResultDetail<'s, S> {
    /// Creates a detail request for the given result identifier.
    pub fn new(session: &'s S, result_id: impl Into<String>) -> Self {
        Self {
            session,
            result_id: result_id.into(),
        }
    }

    /// Creates a detail request for a result taken from the listing.
    pub fn for_result(session: &'s S, result: &ResultWithoutDetails) -> Self {
        Self::new(session, result.identifier.clone())
    }

    /// Returns the identifier this request is for.
    pub fn result_id(&self) -> &str {
        &self.result_id
    }

    /// Fetches and decodes the details. Every call performs a new request.
    ///
    /// Identifiers that would resolve to another path (empty, `.` or `..`)
    /// are rejected without a request.
    pub fn get(&self) -> Result<ResultWithDetails> {
        if matches!(self.result_id.as_str(), "" | "." | "..") {
            return Err(SmartschoolError::InvalidResultId(self.result_id.clone()));
        }

        let response = download(
            self.session,
            &result_detail_path(&self.result_id),
            "No JSON was returned for the details?!",
        )?;
        Ok(response.json()?)
    }
}
