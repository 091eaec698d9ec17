//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Outbound user notifications

pub mod model;
pub mod notifier;

// Re-export commonly used types
pub use model::{Notification, NotificationTemplate};
pub use notifier::{deliver, LogNotifier, MemoryNotifier, Notifier, NotifyError};
