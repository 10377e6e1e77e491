use super::*;

fn modes_of(group: LayerModeGroup) -> Vec<LayerMode> {
    group_array(group)
        .iter()
        .filter_map(|e| match e {
            GroupEntry::Mode(m) => Some(*m),
            GroupEntry::Separator => None,
        })
        .collect()
}

#[test]
fn every_mode_is_listed_once_per_group() {
    for group in [LayerModeGroup::Default, LayerModeGroup::Legacy] {
        let modes = modes_of(group);
        let mut sorted = modes.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), modes.len(), "{group:?} has duplicates");
    }
    for mode in LayerMode::ALL {
        let listed = modes_of(LayerModeGroup::Default).contains(&mode)
            || modes_of(LayerModeGroup::Legacy).contains(&mode);
        assert!(listed, "{mode} is not listed in any group");
    }
}

#[test]
fn group_membership() {
    assert_eq!(LayerMode::MultiplyLegacy.group(), LayerModeGroup::Legacy);
    assert_eq!(LayerMode::Multiply.group(), LayerModeGroup::Default);
    assert_eq!(LayerMode::Dissolve.group(), LayerModeGroup::Default);
    assert_eq!(LayerMode::NormalLegacy.group(), LayerModeGroup::Legacy);
}

#[test]
fn correspondence_is_symmetric() {
    for mode in LayerMode::ALL {
        let Some(legacy) = mode.for_group(LayerModeGroup::Legacy) else {
            continue;
        };
        if let Some(default) = legacy.for_group(LayerModeGroup::Default) {
            assert_eq!(default.for_group(LayerModeGroup::Legacy), Some(legacy), "{mode}");
        }
    }
    assert_eq!(
        LayerMode::Multiply.for_group(LayerModeGroup::Legacy),
        Some(LayerMode::MultiplyLegacy)
    );
    assert_eq!(
        LayerMode::MultiplyLegacy.for_group(LayerModeGroup::Default),
        Some(LayerMode::Multiply)
    );
    assert_eq!(
        LayerMode::Multiply.for_group(LayerModeGroup::Default),
        Some(LayerMode::Multiply)
    );
}

#[test]
fn missing_counterpart_is_none() {
    assert_eq!(LayerMode::Overlay.for_group(LayerModeGroup::Legacy), None);
    assert_eq!(LayerMode::VividLight.for_group(LayerModeGroup::Legacy), None);
    assert_eq!(LayerMode::OverlayLegacy.for_group(LayerModeGroup::Default), None);
    assert_eq!(LayerMode::Replace.for_group(LayerModeGroup::Legacy), None);
}

#[test]
fn context_modes_filter_by_context() {
    let paint = LayerMode::Normal.context_modes(LayerModeContext::PAINT);
    assert_eq!(paint.first(), Some(&LayerMode::Normal));
    assert!(paint.contains(&LayerMode::Erase));
    assert!(!paint.contains(&LayerMode::PassThrough));

    let layer = LayerMode::Multiply.context_modes(LayerModeContext::LAYER);
    assert!(!layer.contains(&LayerMode::Erase));
    assert!(layer.contains(&LayerMode::Dissolve));

    let group = LayerMode::Normal.context_modes(LayerModeContext::GROUP);
    assert!(group.contains(&LayerMode::PassThrough));

    let legacy = LayerMode::ScreenLegacy.context_modes(LayerModeContext::LAYER);
    assert!(legacy.iter().all(|m| *m == LayerMode::Dissolve || m.is_legacy()));
    assert!(!legacy.contains(&LayerMode::BehindLegacy));
}
