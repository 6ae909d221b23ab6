pub mod components;

pub use components::*;

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn page_count_rounds_up_and_never_returns_zero() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(57, 0), 1);
    }

    #[test]
    fn code_options_keep_table_order() {
        let options = code_options(&[("A1", "A1"), ("B2", "B2 upper")]);
        assert_eq!(
            options,
            vec![
                ("A1".to_string(), "A1".to_string()),
                ("B2".to_string(), "B2 upper".to_string())
            ]
        );
    }

    #[test]
    fn empty_row_spans_all_columns() {
        let html = dioxus_ssr::render_element(rsx! {
            DataTableEmpty { colspan: 4, message: "No students found" }
        });
        assert!(html.contains(r#"colspan="4""#));
        assert!(html.contains("No students found"));
    }

    #[test]
    fn detail_item_shows_dash_for_missing_value() {
        let html = dioxus_ssr::render_element(rsx! {
            DetailItem { label: "Phone" }
        });
        assert!(html.contains("Phone"));
        assert!(html.contains("detail-item-missing"));
    }

    #[test]
    fn field_error_takes_the_place_of_the_hint() {
        let html = dioxus_ssr::render_element(rsx! {
            Input {
                label: "Left on",
                hint: "Needed when a reason is given".to_string(),
                error: Some("Must be on or after the enrollment date".to_string()),
            }
        });
        assert!(html.contains("field-control"));
        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains("Must be on or after the enrollment date"));
        assert!(!html.contains("field-hint"));

        let html = dioxus_ssr::render_element(rsx! {
            Input { label: "Left on", hint: "Needed when a reason is given".to_string() }
        });
        assert!(html.contains("field-hint"));
        assert!(html.contains(r#"aria-invalid="false""#));
    }

    #[test]
    fn checkbox_field_puts_the_caption_after_the_box() {
        let html = dioxus_ssr::render_element(rsx! {
            CheckboxField { label: "Pre-enrollment", checked: true }
        });
        let box_at = html.find("checkbox").unwrap_or(usize::MAX);
        let caption_at = html.find("Pre-enrollment").unwrap_or(0);
        assert!(box_at < caption_at);
        assert!(html.contains("field-check"));
    }

    #[test]
    fn status_pill_carries_tone_and_optional_dot() {
        let html = dioxus_ssr::render_element(rsx! {
            Badge { variant: BadgeVariant::Success, dot: true, "Paid" }
        });
        assert!(html.contains(r#"data-tone="ok""#));
        assert!(html.contains("pill-dot"));

        let html = dioxus_ssr::render_element(rsx! {
            Badge { variant: BadgeVariant::Warning, "Open" }
        });
        assert!(html.contains(r#"data-tone="attention""#));
        assert!(!html.contains("pill-dot"));
    }

    #[test]
    fn filter_row_shows_result_count_and_busy_state() {
        let html = dioxus_ssr::render_element(rsx! {
            FilterBar { pending: true, summary: Some("24 students".to_string()),
                Input { placeholder: "Search by name..." }
            }
        });
        assert!(html.contains(r#"aria-busy="true""#));
        assert!(html.contains("filter-row-summary"));
        assert!(html.contains("24 students"));

        let html = dioxus_ssr::render_element(rsx! {
            FilterBar { Input { placeholder: "Search by name..." } }
        });
        assert!(!html.contains("filter-row-summary"));
    }

    #[test]
    fn loading_table_draws_one_bar_per_cell() {
        let html = dioxus_ssr::render_element(rsx! {
            SkeletonRows { rows: 2, columns: 3 }
        });
        assert_eq!(html.matches("placeholder-bar").count(), 6);
        assert_eq!(html.matches("placeholder-row").count(), 2);
        assert!(html.contains("repeat(2, 1fr)"));
    }

    #[test]
    fn page_title_sits_below_the_top_bar_heading() {
        let html = dioxus_ssr::render_element(rsx! {
            PageHeader {
                PageTitle { "Students" }
                PageActions { "New student" }
            }
        });
        assert!(html.contains("<h2"));
        assert!(!html.contains("<h1"));
        assert!(html.contains(r#"role="toolbar""#));
    }

    #[test]
    fn notices_default_to_the_bottom_corner() {
        assert_eq!(NoticePlacement::default().as_str(), "bottom-right");
        assert_eq!(NoticePlacement::TopCenter.as_str(), "top-center");
    }
}
