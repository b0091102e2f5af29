//! # mirage - a minimal prototype-based scripting engine
//!
//! Source text is parsed into statements, lowered into a small stack-based
//! instruction set, and executed by a stack machine against a dynamic,
//! prototype-based object model that can call host-registered
//! functionality.
//!
//! ## Parsing
//!
//! ```
//! let statements = mirage::parser::parse("x = 5").unwrap();
//! assert_eq!(statements.len(), 1);
//! ```
//!
//! ## Running a script
//!
//! ```
//! use mirage::runner::ds::realm::Realm;
//!
//! let realm = Realm::empty();
//! let target = realm.create_object();
//! mirage::runner::run(&realm, &target, "x = 42").unwrap();
//!
//! let x = target.variable("x").unwrap();
//! assert_eq!(x.as_int().map(|v| v.to_string()), Some("42".to_string()));
//! ```
//!
//! ## Host functionality
//!
//! Host types are registered once, at setup time; scripted code reaches
//! them through ordinary method calls.
//!
//! ```
//! use mirage::runner::ds::realm::Realm;
//! use mirage::runner::host::globals::register_core_types;
//! use mirage::runner::host::registry::HostRegistry;
//!
//! let mut registry = HostRegistry::new();
//! register_core_types(&mut registry);
//! let realm = Realm::new(registry).unwrap();
//!
//! let globals = realm.instantiate("globals").unwrap();
//! mirage::runner::run(&realm, &globals, "log 'Hi!'").unwrap();
//! ```
//!
//! ## Architecture
//!
//! - [`parser`] - pest grammar, AST types, pair-to-AST builder
//! - [`runner`] - compiler, instruction set, stack-machine processor
//!   - [`runner::ds`] - objects, actors, tables, the realm
//!   - [`runner::host`] - registration table and host value conversion

pub mod parser;
pub mod runner;
