use dioxus::prelude::*;

use crate::routes::Route;

/// Console section a stray URL most likely belongs to, judged by its first
/// segment. Stale bookmarks usually keep the section and lose the record.
fn nearest_section(route: &[String]) -> Option<(Route, &'static str)> {
    let section = match route.first()?.as_str() {
        "students" | "eleves" => (Route::StudentList {}, "Students"),
        "teachers" | "professeurs" => (Route::TeacherList {}, "Teachers"),
        "courses" | "cours" => (Route::CourseList {}, "Courses"),
        "sessions" => (Route::SessionList {}, "Sessions"),
        "private-lessons" | "cours-prives" => (Route::PrivateLessonList {}, "Private lessons"),
        "invoices" | "factures" => (Route::InvoiceList {}, "Invoices"),
        _ => return None,
    };
    Some(section)
}

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));
    let section = nearest_section(&route);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        main { class: "lost-page",
            section { class: "lost-panel", "aria-labelledby": "lost-heading",
                p { class: "lost-kicker", "École Console" }
                h1 { id: "lost-heading", class: "lost-heading", "No page at this address" }
                p { class: "lost-path",
                    code { "{path}" }
                }
                p { class: "lost-note",
                    "The record may have been deleted, or the link was typed by hand."
                }
                nav { class: "lost-links", "aria-label": "Where to go next",
                    if let Some((target, label)) = section {
                        Link { to: target, class: "lost-link lost-link-primary", "Open {label}" }
                    }
                    Link { to: Route::Dashboard {}, class: "lost-link", "Dashboard" }
                }
            }
        }
    }
}
