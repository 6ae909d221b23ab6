#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod attendance_tests;

#[cfg(test)]
mod student_tests;

#[cfg(test)]
mod payment_tests;

#[cfg(test)]
mod invoice_tests;

#[cfg(test)]
mod health_tests;
