//! Built-in settings categories
//!
//! Each field maps a nested path to its storage key by hand. Keys are part
//! of the storage format: renaming one orphans the rows already written.

use crate::prelude::*;
use crate::settings::{CategoryDefinition, CategoryScope, SettingValue, SettingsRegistry};

fn string(s: &str) -> SettingValue {
	SettingValue::String(s.to_string())
}

/// Register all built-in categories
pub fn register_categories(registry: &mut SettingsRegistry) -> ClResult<()> {
	registry.register(
		CategoryDefinition::builder("calendar")
			.description("Calendar display preferences for the practice")
			.scope(CategoryScope::Practice)
			.field("display.startTime", "calendar_start_time", string("8:00 AM"))
			.field("display.endTime", "calendar_end_time", string("6:00 PM"))
			.field("display.viewMode", "calendar_view_mode", string("week"))
			.field("display.showWeekends", "calendar_show_weekends", SettingValue::Bool(false))
			.field(
				"display.cancellationNoticeHours",
				"calendar_cancellation_notice_hours",
				SettingValue::Int(24),
			)
			.build()?,
	)?;

	registry.register(
		CategoryDefinition::builder("contactForm")
			.description("Public contact form shown to prospective clients")
			.scope(CategoryScope::Practice)
			.field("general.isEnabled", "contact_form_is_enabled", SettingValue::Bool(true))
			.field("general.showOnProfile", "contact_form_show_on_profile", SettingValue::Bool(true))
			.field("general.requirePhone", "contact_form_require_phone", SettingValue::Bool(false))
			.field(
				"general.confirmationMessage",
				"contact_form_confirmation_message",
				string("Thank you for reaching out. We will contact you shortly."),
			)
			.build()?,
	)?;

	registry.register(
		CategoryDefinition::builder("portal")
			.description("Client portal access and self-service options")
			.scope(CategoryScope::Practice)
			.field("general.isEnabled", "portal_is_enabled", SettingValue::Bool(false))
			.field("general.domainUrl", "portal_domain_url", string(""))
			.field("general.welcomeMessage", "portal_welcome_message", string("Welcome to the client portal."))
			.field("appointments.allowRequests", "portal_allow_requests", SettingValue::Bool(true))
			.field(
				"appointments.minimumNoticeHours",
				"portal_minimum_notice_hours",
				SettingValue::Int(24),
			)
			.field("documents.allowUploads", "portal_allow_uploads", SettingValue::Bool(true))
			.build()?,
	)?;

	registry.register(
		CategoryDefinition::builder("billing")
			.description("Invoice and superbill generation")
			.scope(CategoryScope::Practice)
			.field("invoices.autoGenerate", "billing_auto_generate_invoices", SettingValue::Bool(false))
			.field("invoices.dueDays", "billing_invoice_due_days", SettingValue::Int(30))
			.field(
				"superbills.autoGenerate",
				"billing_auto_generate_superbills",
				SettingValue::Bool(false),
			)
			.build()?,
	)?;

	registry.register(
		CategoryDefinition::builder("notifications")
			.description("Reminder notifications sent on behalf of a clinician")
			.scope(CategoryScope::Clinician)
			.field(
				"email.appointmentReminders",
				"notifications_email_appointment_reminders",
				SettingValue::Bool(true),
			)
			.field(
				"email.reminderLeadHours",
				"notifications_email_reminder_lead_hours",
				SettingValue::Int(24),
			)
			.field(
				"sms.appointmentReminders",
				"notifications_sms_appointment_reminders",
				SettingValue::Bool(false),
			)
			.build()?,
	)?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_builtin_categories_register() {
		let mut registry = SettingsRegistry::new();
		register_categories(&mut registry).unwrap();
		let registry = registry.freeze();

		let names: Vec<_> = registry.list().iter().map(|d| d.name.to_string()).collect();
		assert_eq!(names, ["billing", "calendar", "contactForm", "notifications", "portal"]);

		assert_eq!(registry.get("notifications").unwrap().scope, CategoryScope::Clinician);
		assert_eq!(registry.get("calendar").unwrap().scope, CategoryScope::Practice);
		assert_eq!(registry.get("contactForm").unwrap().key_prefix(), "contact_form_");
	}

	#[test]
	fn test_calendar_defaults() {
		let mut registry = SettingsRegistry::new();
		register_categories(&mut registry).unwrap();
		let registry = registry.freeze();

		assert_eq!(
			registry.get("calendar").unwrap().defaults(),
			json!({
				"display": {
					"startTime": "8:00 AM",
					"endTime": "6:00 PM",
					"viewMode": "week",
					"showWeekends": false,
					"cancellationNoticeHours": 24
				}
			})
		);
	}
}

// vim: ts=4
