//! Documentation transformation engine for apimd.
//!
//! Turns a compiler-emitted XML documentation export into Markdown pages and
//! a navigation manifest:
//!
//! 1. [`ApiDocument::parse`] reads the raw `<member>` entries.
//! 2. [`parse_members`] normalizes them into [`Member`] records, dropping
//!    entries whose identifier prefix is not supported.
//! 3. [`group_by_owning_type`] partitions members by owning type.
//! 4. [`render_type_page`] renders each eligible [`Group`].
//! 5. [`Navigation`] collects routes and produces the ordered [`Menu`].
//!
//! [`generate_site`] runs the whole pipeline. Nothing in this crate touches
//! the filesystem.

mod document;
mod error;
mod group;
mod kind;
mod labels;
pub mod markup;
mod member;
pub mod navigation;
mod page;
mod site;
pub mod xml;

pub use document::{ApiDocument, RawEntry};
pub use error::DocumentError;
pub use group::{Group, group_by_owning_type};
pub use kind::{Kind, classify};
pub use labels::Labels;
pub use member::{Member, MemberName, NamedDoc, parse_members};
pub use navigation::{Menu, NavEntry, Navigation};
pub use page::{
    Package, Page, RenderOptions, render_namespace_page, render_package_page, render_type_page,
};
pub use site::{Site, SiteOptions, generate_site};
