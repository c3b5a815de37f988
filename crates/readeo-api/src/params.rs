//! Request parameters and the ordered rules that decide which operation a
//! request maps to.
//!
//! Each endpoint owns a [`Rules`] list. Rules are tried in order and the first
//! whose parameters are all present wins, so the most complete combination
//! must come first. When none matches the request is malformed.
//!
//! Update is the exception: it takes the id plus whichever attribute fields
//! the request carries ([`Params::present`]).

use std::collections::HashMap;

use axum::{
  Form,
  extract::{FromRequest, Request},
};
use readeo_core::{Assignments, EntitySpec, Field};

use crate::error::ApiError;

pub const ID: &str = "id";
pub const START: &str = "start";
pub const END: &str = "end";

// ─── Params ──────────────────────────────────────────────────────────────────

/// Form-encoded key/value pairs of one request, from the query string on
/// `GET` and the body otherwise.
///
/// A body that cannot be read as a form is rejected as [`ApiError::Form`].
#[derive(Debug, Default)]
pub struct Params(HashMap<String, String>);

impl<S: Send + Sync> FromRequest<S> for Params {
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Form(map) = Form::<HashMap<String, String>>::from_request(req, state).await?;
    Ok(Self(map))
  }
}

impl Params {
  pub fn has(&self, name: &str) -> bool { self.0.contains_key(name) }

  pub fn raw(&self, name: &str) -> Option<&str> { self.0.get(name).map(String::as_str) }

  /// An integer parameter such as an id or a range bound.
  pub fn integer(&self, name: &str) -> Result<i64, ApiError> {
    let raw = self
      .raw(name)
      .ok_or_else(|| ApiError::BadRequest(format!("missing parameter {name:?}")))?;
    raw
      .trim()
      .parse()
      .map_err(|_| ApiError::BadRequest(format!("parameter {name:?} is not an integer: {raw:?}")))
  }

  /// The attribute fields of `spec` present in the request, in declaration
  /// order.
  pub fn present(&self, spec: &'static EntitySpec) -> Vec<&'static Field> {
    spec.fields.iter().filter(|f| self.has(f.param)).collect()
  }

  /// Parse every field of `fields` with its declared kind.
  pub fn assignments(&self, fields: &[&'static Field]) -> Result<Assignments, ApiError> {
    fields
      .iter()
      .map(|field| {
        let raw = self
          .raw(field.param)
          .ok_or_else(|| ApiError::BadRequest(format!("missing parameter {:?}", field.param)))?;
        Ok((*field, field.parse(raw)?))
      })
      .collect()
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// One accepted parameter combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
  /// Every parameter that must be present.
  pub params: Vec<&'static str>,
  /// The attribute fields this combination writes, in bind order.
  pub fields: Vec<&'static Field>,
}

impl Rule {
  fn new(keys: &[&'static str], fields: &[&'static Field]) -> Self {
    let params = keys.iter().copied().chain(fields.iter().map(|f| f.param)).collect();
    Self { params, fields: fields.to_vec() }
  }

  fn matches(&self, params: &Params) -> bool { self.params.iter().all(|p| params.has(p)) }
}

/// An ordered list of rules, most complete first.
#[derive(Debug, Clone)]
pub struct Rules(Vec<Rule>);

impl Rules {
  /// A single combination with no fields, e.g. `["id"]`.
  pub fn exactly(keys: &[&'static str]) -> Self { Self(vec![Rule::new(keys, &[])]) }

  /// All fields, then progressively fewer trailing optional fields.
  pub fn create(spec: &EntitySpec) -> Self {
    let required = spec.fields.iter().take_while(|f| f.is_required()).count();
    let fields: Vec<&'static Field> = spec.fields.iter().collect();
    let rules = (required.max(1)..=fields.len())
      .rev()
      .map(|n| Rule::new(&[], &fields[..n]))
      .collect();
    Self(rules)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Rule> { self.0.iter() }

  /// The first rule whose parameters are all present.
  pub fn resolve(&self, params: &Params) -> Result<&Rule, ApiError> {
    self.0.iter().find(|rule| rule.matches(params)).ok_or_else(|| {
      let expected = self
        .0
        .iter()
        .map(|rule| rule.params.join("+"))
        .collect::<Vec<_>>()
        .join(" | ");
      ApiError::BadRequest(format!("expected one of: {expected}"))
    })
  }
}

/// The compiled rule lists of one entity's endpoints.
#[derive(Debug)]
pub struct EntityRules {
  pub create: Rules,
  pub by_id:  Rules,
  pub lookup: Rules,
  pub range:  Rules,
}

impl EntityRules {
  pub fn compile(spec: &EntitySpec) -> Self {
    Self {
      create: Rules::create(spec),
      by_id:  Rules::exactly(&[ID]),
      lookup: Rules(vec![Rule::new(&[], &[spec.lookup])]),
      range:  Rules::exactly(&[START, END]),
    }
  }
}
