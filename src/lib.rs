//! This crate implements the object model for a git repository: it decodes
//! raw, type-tagged object content (as handed over by some object store) into
//! commits, trees, and blobs, and computes the content hash that identifies
//! each object.
//!
//! Retrieving the raw bytes (loose objects, packs, zlib, network transport)
//! is the job of the surrounding storage layer and is not handled here.

#![deny(warnings)]

pub mod object;
