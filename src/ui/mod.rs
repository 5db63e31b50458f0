// SPDX-License-Identifier: MPL-2.0
//! UI layer: screen views, shared components, and visual tokens.

pub mod archive;
pub mod components;
pub mod design_tokens;
pub mod gallery_screen;
pub mod home;
pub mod icons;
pub mod not_found;
pub mod styles;
pub mod theming;
