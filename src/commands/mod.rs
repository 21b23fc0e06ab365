// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod quotes;
pub mod items;
pub mod render;
pub mod importer;
pub mod exporter;
pub mod ai;
pub mod settings;
pub mod doctor;
