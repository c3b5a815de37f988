//! The built-in entity catalogue.
//!
//! Each entity is a plain [`EntitySpec`] value; adding a table means adding
//! one more static here and listing it in [`ALL`].

use crate::entity::{EntitySpec, Field, FieldKind};

const COUNTRY_NAME: Field = Field::required("name", "name_country", FieldKind::Text).unique();

pub static COUNTRY: EntitySpec = EntitySpec {
  name:        "country",
  route:       "countries",
  table:       "Country",
  id_column:   "id_country",
  fields:      &[COUNTRY_NAME],
  lookup:      &COUNTRY_NAME,
  listing:     &COUNTRY_NAME,
  constraints: &[],
};

const CITY_NAME: Field = Field::required("name", "name_city", FieldKind::Text);

pub static CITY: EntitySpec = EntitySpec {
  name:        "city",
  route:       "cities",
  table:       "City",
  id_column:   "id_city",
  fields:      &[CITY_NAME],
  lookup:      &CITY_NAME,
  listing:     &CITY_NAME,
  constraints: &[],
};

const AUTHOR_NAME: Field = Field::required("name", "name_author", FieldKind::Text);

pub static AUTHOR: EntitySpec = EntitySpec {
  name:        "author",
  route:       "authors",
  table:       "Author",
  id_column:   "id_author",
  fields:      &[AUTHOR_NAME],
  lookup:      &AUTHOR_NAME,
  listing:     &AUTHOR_NAME,
  constraints: &[],
};

const PROFILE_AVATAR: Field = Field::required("avatar", "avatar", FieldKind::Text);
const PROFILE_DESCRIPTION: Field = Field::optional("description", "description", FieldKind::Text);

pub static PROFILE: EntitySpec = EntitySpec {
  name:        "profile",
  route:       "profiles",
  table:       "Profile",
  id_column:   "id_profile",
  fields:      &[PROFILE_AVATAR, PROFILE_DESCRIPTION],
  lookup:      &PROFILE_AVATAR,
  listing:     &PROFILE_AVATAR,
  constraints: &[],
};

const REVIEW_USER: Field = Field::required("idUser", "id_user", FieldKind::Integer);
const REVIEW_BOOK: Field = Field::required("idBook", "id_book", FieldKind::Integer);
const REVIEW_TEXT: Field = Field::required("review", "review", FieldKind::Text);
const REVIEW_SHARED: Field = Field::optional("shared", "shared", FieldKind::Boolean);

/// A user's review of a book. `id_user` and `id_book` are foreign keys in
/// the wider schema but are neither enforced nor traversed here.
pub static REVIEW: EntitySpec = EntitySpec {
  name:        "review",
  route:       "reviews",
  table:       "Review",
  id_column:   "id_review",
  fields:      &[REVIEW_USER, REVIEW_BOOK, REVIEW_TEXT, REVIEW_SHARED],
  lookup:      &REVIEW_TEXT,
  listing:     &REVIEW_TEXT,
  constraints: &["UNIQUE (id_user, id_book)"],
};

/// Every entity served by default.
pub static ALL: &[&EntitySpec] = &[&COUNTRY, &CITY, &AUTHOR, &PROFILE, &REVIEW];
