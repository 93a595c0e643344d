// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod orders;
pub mod expenses;
pub mod stock;
pub mod dashboard;
pub mod views;
pub mod settings;
