// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin-list filters.
//!
//! Pure transforms over a decoded plugin list; each returns a new list and
//! never mutates its input. [`apply_filters`] runs the enabled ones in the
//! fixed order user-installed → disabled → vendor-bundle.

use tracing::debug;

use crate::config::ExporterConfig;
use crate::types::Plugin;

/// Plugins kept by the user-installed filter even when not user-installed.
/// Both are needed for self-management visibility: they are what an
/// administrator uses to manage and troubleshoot the other plugins.
const USER_INSTALLED_EXEMPT_NAMES: [&str; 2] = [
    "Atlassian Universal Plugin Manager Plugin",
    "Atlassian Troubleshooting and Support Tools",
];

/// `applicationKey` value identifying plugins the vendor bundles with Jira
/// Software. Matched exactly; these are not independently managed.
const VENDOR_BUNDLE_APPLICATION_KEY: &str = "jira-software";

/// Keeps plugins with `userInstalled == true`, plus the exempted names.
pub fn retain_user_installed(plugins: &[Plugin]) -> Vec<Plugin> {
    plugins
        .iter()
        .filter(|plugin| {
            if plugin.user_installed
                || USER_INSTALLED_EXEMPT_NAMES.contains(&plugin.name.as_str())
            {
                true
            } else {
                debug!(plugin = %plugin.name, "dropping plugin that is not user-installed");
                false
            }
        })
        .cloned()
        .collect()
}

/// Keeps plugins with `enabled == true`.
pub fn drop_disabled(plugins: &[Plugin]) -> Vec<Plugin> {
    plugins
        .iter()
        .filter(|plugin| {
            if plugin.enabled {
                true
            } else {
                debug!(plugin = %plugin.name, "dropping disabled plugin");
                false
            }
        })
        .cloned()
        .collect()
}

/// Drops plugins whose `applicationKey` is exactly the Jira Software
/// vendor-bundle key. A missing or empty key is kept.
pub fn drop_vendor_bundled(plugins: &[Plugin]) -> Vec<Plugin> {
    plugins
        .iter()
        .filter(|plugin| {
            if plugin.application_key.as_deref() == Some(VENDOR_BUNDLE_APPLICATION_KEY) {
                debug!(plugin = %plugin.name, "dropping vendor-bundled plugin");
                false
            } else {
                true
            }
        })
        .cloned()
        .collect()
}

/// Applies the filters enabled in `config`, each a no-op pass-through when
/// its flag is off, in the fixed order user-installed → disabled →
/// vendor-bundle.
pub fn apply_filters(mut plugins: Vec<Plugin>, config: &ExporterConfig) -> Vec<Plugin> {
    if config.user_installed_only {
        plugins = retain_user_installed(&plugins);
    }
    if config.drop_disabled {
        plugins = drop_disabled(&plugins);
    }
    if config.drop_vendor_bundled {
        plugins = drop_vendor_bundled(&plugins);
    }
    plugins
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin(key: &str, name: &str) -> Plugin {
        Plugin {
            key: key.to_string(),
            name: name.to_string(),
            version: "1.0".to_string(),
            enabled: true,
            user_installed: true,
            application_key: None,
        }
    }

    #[test]
    fn user_installed_filter_keeps_exempted_names() {
        let mut upm = plugin("com.atlassian.upm", "Atlassian Universal Plugin Manager Plugin");
        upm.user_installed = false;
        let mut support = plugin("com.atlassian.troubleshooting", "Atlassian Troubleshooting and Support Tools");
        support.user_installed = false;
        let mut bundled = plugin("com.atlassian.other", "Some Bundled Plugin");
        bundled.user_installed = false;
        let user = plugin("com.example.user", "User Plugin");

        let kept = retain_user_installed(&[upm, support, bundled, user]);
        let names: Vec<&str> = kept.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Atlassian Universal Plugin Manager Plugin",
                "Atlassian Troubleshooting and Support Tools",
                "User Plugin",
            ]
        );
    }

    #[test]
    fn drop_disabled_keeps_only_enabled() {
        let enabled = plugin("a", "A");
        let mut disabled = plugin("b", "B");
        disabled.enabled = false;

        let kept = drop_disabled(&[enabled, disabled]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].key, "a");
    }

    #[test]
    fn vendor_filter_matches_exactly() {
        let mut bundled = plugin("a", "A");
        bundled.application_key = Some("jira-software".to_string());
        let mut near_miss = plugin("b", "B");
        near_miss.application_key = Some("jira-software-extra".to_string());
        let mut cased = plugin("c", "C");
        cased.application_key = Some("Jira-Software".to_string());
        let mut empty = plugin("d", "D");
        empty.application_key = Some(String::new());
        let absent = plugin("e", "E");

        let kept = drop_vendor_bundled(&[bundled, near_miss, cased, empty, absent]);
        let keys: Vec<&str> = kept.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn filters_do_not_mutate_input() {
        let input = vec![plugin("a", "A"), plugin("b", "B")];
        let _ = drop_disabled(&input);
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn apply_filters_is_passthrough_with_flags_off() {
        let config = ExporterConfig::new("jira.example.com", "token");
        let mut disabled = plugin("a", "A");
        disabled.enabled = false;
        let plugins = vec![disabled, plugin("b", "B")];

        let out = apply_filters(plugins.clone(), &config);
        assert_eq!(out, plugins);
    }

    #[test]
    fn apply_filters_runs_in_fixed_order() {
        let mut config = ExporterConfig::new("jira.example.com", "token");
        config.user_installed_only = true;
        config.drop_disabled = true;
        config.drop_vendor_bundled = true;

        // Disabled exempted plugin: survives the user-installed filter,
        // then falls to the disabled filter.
        let mut upm = plugin("com.atlassian.upm", "Atlassian Universal Plugin Manager Plugin");
        upm.user_installed = false;
        upm.enabled = false;
        // Enabled, user-installed, but vendor-bundled.
        let mut bundled = plugin("com.atlassian.jsw", "Jira Software Plugin");
        bundled.application_key = Some("jira-software".to_string());
        let survivor = plugin("com.example.user", "User Plugin");

        let out = apply_filters(vec![upm, bundled, survivor], &config);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].key, "com.example.user");
    }

    mod properties {
        use proptest::prelude::*;

        use crate::filter::{
            USER_INSTALLED_EXEMPT_NAMES, drop_disabled, drop_vendor_bundled,
            retain_user_installed,
        };
        use crate::types::Plugin;

        fn plugin_strategy() -> impl Strategy<Value = Plugin> {
            (
                "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}",
                prop_oneof![
                    Just("Atlassian Universal Plugin Manager Plugin".to_string()),
                    Just("Atlassian Troubleshooting and Support Tools".to_string()),
                    "[A-Za-z ]{1,24}",
                ],
                "[0-9]\\.[0-9]{1,2}",
                any::<bool>(),
                any::<bool>(),
                proptest::option::of(prop_oneof![
                    Just("jira-software".to_string()),
                    "[a-z-]{0,16}",
                ]),
            )
                .prop_map(
                    |(key, name, version, enabled, user_installed, application_key)| Plugin {
                        key,
                        name,
                        version,
                        enabled,
                        user_installed,
                        application_key,
                    },
                )
        }

        proptest! {
            #[test]
            fn drop_disabled_is_idempotent(
                plugins in proptest::collection::vec(plugin_strategy(), 0..16)
            ) {
                let once = drop_disabled(&plugins);
                let twice = drop_disabled(&once);
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn retain_user_installed_is_idempotent(
                plugins in proptest::collection::vec(plugin_strategy(), 0..16)
            ) {
                let once = retain_user_installed(&plugins);
                let twice = retain_user_installed(&once);
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn vendor_filter_drops_exact_key_only(
                plugins in proptest::collection::vec(plugin_strategy(), 0..16)
            ) {
                let kept = drop_vendor_bundled(&plugins);
                for plugin in &plugins {
                    let dropped = !kept.contains(plugin);
                    let is_bundled =
                        plugin.application_key.as_deref() == Some("jira-software");
                    prop_assert_eq!(dropped, is_bundled);
                }
            }

            #[test]
            fn non_user_installed_kept_iff_exempted(
                plugins in proptest::collection::vec(plugin_strategy(), 0..16)
            ) {
                let kept = retain_user_installed(&plugins);
                for plugin in plugins.iter().filter(|p| !p.user_installed) {
                    let retained = kept.contains(plugin);
                    let exempted = USER_INSTALLED_EXEMPT_NAMES
                        .contains(&plugin.name.as_str());
                    prop_assert_eq!(retained, exempted);
                }
            }
        }
    }
}
