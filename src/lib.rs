//! **tilerc** — a tiling window manager configuration as typed data.
//!
//! The crate declares keybindings, workspace groups, scratchpad drop-downs,
//! layouts, floating rules, mouse bindings and a status-bar widget list,
//! validates them, and serialises them for the framework that actually
//! manages windows.  It does not manage windows itself.
//!
//! # Architecture
//!
//! * [`config::Config`] — the root of every declaration, loadable from
//!   JSON with per-section defaults.  [`Config::check`](config::Config::check)
//!   reports conflicting keys, dangling group/scratchpad references and
//!   malformed colours.
//! * [`label`] — fixed-width label formatting, used by the task list so
//!   window titles always occupy the same slot width.
//! * [`traits::Spawner`] — the one seam to the outside world, used by the
//!   autostart hook in [`hooks`].
//!
//! The remaining modules ([`action`], [`keys`], [`mouse`], [`groups`],
//! [`layout`], [`theme`], [`bar`]) hold the declaration types.

pub mod action;
pub mod bar;
pub mod config;
pub mod groups;
pub mod hooks;
pub mod keys;
pub mod label;
pub mod layout;
pub mod mouse;
pub mod theme;
pub mod traits;
