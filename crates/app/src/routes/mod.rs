pub mod courses;
pub mod dashboard;
pub mod invoices;
pub mod login;
pub mod not_found;
pub mod private_lessons;
pub mod sessions;
pub mod students;
pub mod teachers;

use crate::auth::use_auth;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBookOpen, LdCalendar, LdClock, LdGraduationCap, LdLayoutDashboard, LdLogOut, LdMenu,
    LdReceipt, LdUserCheck, LdUsers,
};
use dioxus_free_icons::Icon;
use shared_ui::{
    SideNav, SideNavBrand, SideNavFooter, SideNavGroup, SideNavInset, SideNavItem,
    SideNavProvider, SideNavToggle,
};

use courses::{CourseEditPage, CourseList};
use dashboard::Dashboard;
use login::Login;
use not_found::NotFound;
use teachers::TeacherList;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login")]
    Login {},
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/")]
    Dashboard {},
    // ── Students ──
    #[route("/students")]
    StudentList {},
    #[route("/students/new")]
    StudentCreate {},
    #[route("/students/:id")]
    StudentDetail { id: i64 },
    #[route("/students/:id/edit")]
    StudentEdit { id: i64 },
    #[route("/students/:id/invoice")]
    StudentInvoiceCreate { id: i64 },
    #[route("/students/:id/enrollments/:enrollment_id/edit")]
    EnrollmentEdit { id: i64, enrollment_id: i64 },
    // ── Staff and catalogue ──
    #[route("/teachers")]
    TeacherList {},
    #[route("/courses")]
    CourseList {},
    #[route("/courses/:id/edit")]
    CourseEdit { id: i64 },
    // ── Sessions and attendance ──
    #[route("/sessions")]
    SessionList {},
    #[route("/sessions/new")]
    SessionCreate {},
    #[route("/sessions/:id")]
    SessionDetail { id: i64 },
    #[route("/sessions/:id/edit")]
    SessionEdit { id: i64 },
    #[route("/sessions/:id/sheets/new")]
    SheetCreate { id: i64 },
    #[route("/sessions/:id/sheets/:sheet_id")]
    AttendanceSheet { id: i64, sheet_id: i64 },
    // ── Private lessons ──
    #[route("/private-lessons")]
    PrivateLessonList {},
    #[route("/private-lessons/new")]
    PrivateLessonCreate {},
    #[route("/private-lessons/:id")]
    PrivateLessonDetail { id: i64 },
    #[route("/private-lessons/:id/edit")]
    PrivateLessonEdit { id: i64 },
    // ── Invoices ──
    #[route("/invoices")]
    InvoiceList {},
    #[route("/invoices/:id")]
    InvoiceDetail { id: i64 },
    #[route("/invoices/:id/pay")]
    InvoicePay { id: i64 },
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Redirects to /login unless the school backend accepts the session.
///
/// `use_server_future` with `?` suspends during SSR until the check is done,
/// so the hydrated client starts with the answer.
#[component]
fn AuthGuard() -> Element {
    let auth = use_auth();
    let resource = use_server_future(move || async move { server::api::check_session().await })?;

    let result = resource.read().as_ref().cloned();

    match result {
        Some(Ok(true)) => {
            auth.confirm(true);
            rsx! { Outlet::<Route> {} }
        }
        Some(Ok(false)) | Some(Err(_)) => {
            auth.confirm(false);
            navigator().push(Route::Login {});
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting to login..." }
                }
            }
        }
        None => {
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Loading..." }
                }
            }
        }
    }
}

/// Sidebar navigation around every signed-in page.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let auth = use_auth();

    let page_title = match &route {
        Route::Dashboard {} => "Dashboard",
        Route::StudentList {}
        | Route::StudentCreate {}
        | Route::StudentDetail { .. }
        | Route::StudentEdit { .. }
        | Route::StudentInvoiceCreate { .. }
        | Route::EnrollmentEdit { .. } => "Students",
        Route::TeacherList {} => "Teachers",
        Route::CourseList {} | Route::CourseEdit { .. } => "Courses",
        Route::SessionList {}
        | Route::SessionCreate {}
        | Route::SessionDetail { .. }
        | Route::SessionEdit { .. }
        | Route::SheetCreate { .. }
        | Route::AttendanceSheet { .. } => "Sessions",
        Route::PrivateLessonList {}
        | Route::PrivateLessonCreate {}
        | Route::PrivateLessonDetail { .. }
        | Route::PrivateLessonEdit { .. } => "Private lessons",
        Route::InvoiceList {} | Route::InvoiceDetail { .. } | Route::InvoicePay { .. } => "Invoices",
        Route::Login {} | Route::NotFound { .. } => "",
    };

    let students_active = matches!(
        route,
        Route::StudentList {}
            | Route::StudentCreate {}
            | Route::StudentDetail { .. }
            | Route::StudentEdit { .. }
            | Route::StudentInvoiceCreate { .. }
            | Route::EnrollmentEdit { .. }
    );
    let courses_active = matches!(route, Route::CourseList {} | Route::CourseEdit { .. });
    let sessions_active = matches!(
        route,
        Route::SessionList {}
            | Route::SessionCreate {}
            | Route::SessionDetail { .. }
            | Route::SessionEdit { .. }
            | Route::SheetCreate { .. }
            | Route::AttendanceSheet { .. }
    );
    let lessons_active = matches!(
        route,
        Route::PrivateLessonList {}
            | Route::PrivateLessonCreate {}
            | Route::PrivateLessonDetail { .. }
            | Route::PrivateLessonEdit { .. }
    );
    let invoices_active = matches!(
        route,
        Route::InvoiceList {} | Route::InvoiceDetail { .. } | Route::InvoicePay { .. }
    );

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }
        document::Title { "{page_title} · École" }

        SideNavProvider {
            SideNav {
                SideNavBrand {
                    Icon::<LdGraduationCap> { icon: LdGraduationCap, width: 20, height: 20 }
                    span { class: "brand-name", "École" }
                }

                SideNavGroup { label: "Overview",
                    SideNavItem { active: route == Route::Dashboard {},
                        Link { to: Route::Dashboard {},
                            Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 }
                            span { "Dashboard" }
                        }
                    }
                }

                SideNavGroup { label: "People",
                    SideNavItem { active: students_active,
                        Link { to: Route::StudentList {},
                            Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 }
                            span { "Students" }
                        }
                    }
                    SideNavItem { active: route == Route::TeacherList {},
                        Link { to: Route::TeacherList {},
                            Icon::<LdUserCheck> { icon: LdUserCheck, width: 18, height: 18 }
                            span { "Teachers" }
                        }
                    }
                }

                SideNavGroup { label: "Teaching",
                    SideNavItem { active: courses_active,
                        Link { to: Route::CourseList {},
                            Icon::<LdBookOpen> { icon: LdBookOpen, width: 18, height: 18 }
                            span { "Courses" }
                        }
                    }
                    SideNavItem { active: sessions_active,
                        Link { to: Route::SessionList {},
                            Icon::<LdCalendar> { icon: LdCalendar, width: 18, height: 18 }
                            span { "Sessions" }
                        }
                    }
                    SideNavItem { active: lessons_active,
                        Link { to: Route::PrivateLessonList {},
                            Icon::<LdClock> { icon: LdClock, width: 18, height: 18 }
                            span { "Private lessons" }
                        }
                    }
                }

                SideNavGroup { label: "Billing",
                    SideNavItem { active: invoices_active,
                        Link { to: Route::InvoiceList {},
                            Icon::<LdReceipt> { icon: LdReceipt, width: 18, height: 18 }
                            span { "Invoices" }
                        }
                    }
                }

                SideNavFooter {
                    button {
                        class: "sign-out-button",
                        r#type: "button",
                        onclick: move |_| async move {
                            auth.sign_out().await;
                            navigator().push(Route::Login {});
                        },
                        Icon::<LdLogOut> { icon: LdLogOut, width: 18, height: 18 }
                        span { "Sign out" }
                    }
                }
            }

            SideNavInset {
                header { class: "top-bar",
                    SideNavToggle {
                        Icon::<LdMenu> { icon: LdMenu, width: 20, height: 20 }
                    }
                    h1 { class: "top-bar-title", "{page_title}" }
                }

                div { class: "page-content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn StudentList() -> Element {
    students::list::StudentListPage()
}

#[component]
fn StudentCreate() -> Element {
    students::create::StudentCreatePage()
}

#[component]
fn StudentDetail(id: i64) -> Element {
    rsx! { students::detail::StudentDetailPage { id: id } }
}

#[component]
fn StudentEdit(id: i64) -> Element {
    rsx! { students::edit::StudentEditPage { id: id } }
}

#[component]
fn StudentInvoiceCreate(id: i64) -> Element {
    rsx! { students::invoice::StudentInvoicePage { id: id } }
}

#[component]
fn EnrollmentEdit(id: i64, enrollment_id: i64) -> Element {
    rsx! { students::edit::EnrollmentEditPage { student_id: id, enrollment_id: enrollment_id } }
}

#[component]
fn CourseEdit(id: i64) -> Element {
    rsx! { CourseEditPage { id: id } }
}

#[component]
fn SessionList() -> Element {
    sessions::list::SessionListPage()
}

#[component]
fn SessionCreate() -> Element {
    sessions::create::SessionCreatePage()
}

#[component]
fn SessionDetail(id: i64) -> Element {
    rsx! { sessions::detail::SessionDetailPage { id: id } }
}

#[component]
fn SessionEdit(id: i64) -> Element {
    rsx! { sessions::create::SessionEditPage { id: id } }
}

#[component]
fn SheetCreate(id: i64) -> Element {
    rsx! { sessions::sheet_create::SheetCreatePage { session_id: id } }
}

#[component]
fn AttendanceSheet(id: i64, sheet_id: i64) -> Element {
    rsx! { sessions::attendance::AttendanceSheetPage { session_id: id, sheet_id: sheet_id } }
}

#[component]
fn PrivateLessonList() -> Element {
    private_lessons::list::PrivateLessonListPage()
}

#[component]
fn PrivateLessonCreate() -> Element {
    private_lessons::create::PrivateLessonCreatePage()
}

#[component]
fn PrivateLessonDetail(id: i64) -> Element {
    rsx! { private_lessons::detail::PrivateLessonDetailPage { id: id } }
}

#[component]
fn PrivateLessonEdit(id: i64) -> Element {
    rsx! { private_lessons::create::PrivateLessonEditPage { id: id } }
}

#[component]
fn InvoiceList() -> Element {
    invoices::list::InvoiceListPage()
}

#[component]
fn InvoiceDetail(id: i64) -> Element {
    rsx! { invoices::detail::InvoiceDetailPage { id: id } }
}

#[component]
fn InvoicePay(id: i64) -> Element {
    rsx! { invoices::pay::InvoicePayPage { id: id } }
}
