/// Whether a pending extension update may reload now.
///
/// Reloading closes every viewer tab, so the update waits while any is open.
pub fn should_reload_on_update(open_viewer_tabs: usize) -> bool {
    open_viewer_tabs == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_waits_for_viewer_tabs() {
        assert!(should_reload_on_update(0));
        assert!(!should_reload_on_update(1));
        assert!(!should_reload_on_update(3));
    }
}
