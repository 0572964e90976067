//! # Photo Folio
//!
//! A small photo portfolio web server. A directory of images is the whole
//! database: drop files into `static/desktop/` and `static/mobile/`, name them
//! with a category prefix, and they show up in the galleries.
//!
//! # Architecture: One Pipeline, Two Shapes
//!
//! Every request that lists photos runs the same pipeline from scratch:
//!
//! ```text
//! 1. Scan        static/<variant>/  →  image filenames   (filesystem order)
//! 2. Filter      filenames          →  public filenames  (about-me removed, sorted)
//! 3. Categorize  filename           →  category          (prefix convention)
//! 4. Present     entries            →  HTML page | JSON envelope
//! ```
//!
//! Stages 2 and 3 are pure functions. Stage 1 never fails: a missing or
//! unreadable directory is an empty listing. Stage 4 has two shapes built from
//! the same data, page views and the `/api/photos` resource.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: lists image files in a variant directory |
//! | [`filter`] | Stage 2: about-me exclusion and ordering |
//! | [`naming`] | Stage 3: `<category>-name` filename convention |
//! | [`listing`] | Stage 4: page and API shapes, photo URLs, back links |
//! | [`pages`] | HTML rendering with Maud |
//! | [`routes`] | axum handlers |
//! | [`server`] | Router, shared state, listen loop |
//! | [`config`] | `config.toml` loading, environment overrides, validation |
//! | [`error`] | Request errors and their HTTP status |
//! | [`types`] | `Variant` and `PhotoEntry` |
//! | [`output`] | CLI output for `photo-folio scan` |
//!
//! # Design Decisions
//!
//! ## No Cache
//!
//! The photo store changes only when someone deploys new files. Re-reading a
//! directory of a few hundred entries per request is cheap, and it means a
//! deploy is visible immediately without any invalidation logic. A cache
//! would have to watch the directory to stay correct.
//!
//! ## Filenames as Schema
//!
//! A photo's gallery category lives in its filename prefix
//! (`Supercars-001-red.jpg`). There is no sidecar file to drift out of sync
//! with the images. The convention is documented in [`naming`].
//!
//! ## Configuration at the Edge
//!
//! The form-service access key and development flag come from the
//! environment, but only `main` reads it. Handlers see an immutable
//! [`config::SiteConfig`] behind an `Arc`.
//!
//! ## Maud Over Template Engines
//!
//! Pages are generated with [Maud](https://maud.lambda.xyz/): templates are
//! checked at compile time, interpolation is escaped by default, and there is
//! no template directory to ship next to the binary.

pub mod config;
pub mod error;
pub mod filter;
pub mod listing;
pub mod naming;
pub mod output;
pub mod pages;
pub mod routes;
pub mod scan;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
