use dioxus::prelude::*;
use shared_types::{
    format_chf, AppError, Invoice, PaymentRequest, PAYMENT_METHODS, PAYMENT_MODES, PERSONAL_MODE,
};
use shared_ui::{
    code_options, use_toast, Button, ButtonVariant, Card, CardContent, ErrorCard, FormSelect,
    Input, PageHeader, PageSubtitle, PageTitle, SkeletonRows, ToastOptions,
};
use std::collections::HashMap;

use crate::format_helpers::parse_amount;
use crate::routes::Route;

#[derive(Debug, Clone, Default, PartialEq)]
struct PaymentForm {
    amount: String,
    mode: String,
    method: String,
}

impl PaymentForm {
    fn is_personal(&self) -> bool {
        self.mode == PERSONAL_MODE
    }

    fn to_request(&self, invoice_id: i64) -> Result<PaymentRequest, HashMap<String, String>> {
        let Some(amount) = parse_amount(&self.amount) else {
            return Err(HashMap::from([(
                "amount".to_string(),
                "Enter an amount".to_string(),
            )]));
        };
        Ok(PaymentRequest {
            amount,
            mode: self.mode.clone(),
            method: Some(self.method.clone()).filter(|m| !m.is_empty()),
            invoice_id,
        })
    }
}

#[component]
pub fn InvoicePayPage(id: i64) -> Element {
    let mut detail = use_resource(move || async move { server::api::get_invoice_detail(id).await });

    rsx! {
        div { class: "container",
            match &*detail.read() {
                Some(Ok(d)) => rsx! { PaymentFormCard { invoice: d.invoice.clone() } },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| detail.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 4 } },
            }
        }
    }
}

#[component]
fn PaymentFormCard(invoice: Invoice) -> Element {
    let toast = use_toast();
    let id = invoice.id;
    let remaining = invoice.remaining;

    let mut form = use_signal(move || PaymentForm {
        amount: format!("{remaining:.2}"),
        ..PaymentForm::default()
    });
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        errors.set(HashMap::new());

        let body = match form.read().to_request(id) {
            Ok(body) => body,
            Err(fe) => {
                errors.set(fe);
                return;
            }
        };
        let body = match body.checked(remaining) {
            Ok(body) => body,
            Err(e) if !e.field_errors.is_empty() => {
                errors.set(e.field_errors);
                return;
            }
            Err(e) => {
                toast.error(e.message, ToastOptions::new());
                return;
            }
        };

        saving.set(true);
        match server::api::record_payment(body).await {
            Ok(_) => {
                toast.success("Payment recorded".to_string(), ToastOptions::new());
                navigator().push(Route::InvoiceDetail { id });
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    toast.error(AppError::friendly_message(&err_str), ToastOptions::new());
                } else {
                    errors.set(fe);
                }
            }
        }
        saving.set(false);
    };

    rsx! {
        PageHeader {
            PageTitle { "Record payment" }
            PageSubtitle {
                "Invoice #{id} · {invoice.student_last_name} {invoice.student_first_name} · {format_chf(remaining)} remaining"
            }
        }

        if invoice.is_paid() {
            div { class: "notice", "This invoice is already fully paid." }
        } else {
            Card {
                CardContent {
                    form { onsubmit: handle_submit,
                        div { class: "form-grid",
                            Input {
                                label: "Amount (CHF)",
                                value: form.read().amount.clone(),
                                error: errors.read().get("amount").cloned(),
                                on_input: move |e: FormEvent| form.write().amount = e.value(),
                            }
                            FormSelect {
                                label: "Payment mode",
                                placeholder: "Select...",
                                value: form.read().mode.clone(),
                                options: code_options(PAYMENT_MODES),
                                error: errors.read().get("mode").cloned(),
                                onchange: move |e: FormEvent| form.write().mode = e.value(),
                            }
                            if form.read().is_personal() {
                                FormSelect {
                                    label: "Payment method",
                                    placeholder: "Select...",
                                    value: form.read().method.clone(),
                                    options: code_options(PAYMENT_METHODS),
                                    error: errors.read().get("method").cloned(),
                                    onchange: move |e: FormEvent| form.write().method = e.value(),
                                }
                            }
                        }
                        div { class: "form-actions",
                            Link { to: Route::InvoiceDetail { id },
                                Button { variant: ButtonVariant::Ghost, "Cancel" }
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                busy: saving(),
                                "Record payment"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_is_dropped_for_third_party_modes() {
        let form = PaymentForm {
            amount: "120".into(),
            mode: "BPA".into(),
            method: "CAR".into(),
        };
        let req = form.to_request(4).unwrap().checked(300.0).unwrap();
        assert_eq!(req.method, None);
        assert_eq!(req.invoice_id, 4);
    }

    #[test]
    fn personal_payment_needs_a_method() {
        let form = PaymentForm {
            amount: "50".into(),
            mode: PERSONAL_MODE.into(),
            method: String::new(),
        };
        assert!(form.is_personal());
        let err = form.to_request(4).unwrap().checked(300.0).unwrap_err();
        assert!(err.field_errors.contains_key("method"));
    }

    #[test]
    fn amount_above_balance_is_rejected() {
        let form = PaymentForm {
            amount: "300.05".into(),
            mode: PERSONAL_MODE.into(),
            method: "ESP".into(),
        };
        let err = form.to_request(4).unwrap().checked(300.0).unwrap_err();
        assert!(err.field_errors.contains_key("amount"));
    }

    #[test]
    fn blank_amount_is_a_form_error() {
        let errors = PaymentForm::default().to_request(4).unwrap_err();
        assert!(errors.contains_key("amount"));
    }
}
