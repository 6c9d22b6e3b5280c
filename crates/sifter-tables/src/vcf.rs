use sifter_core::Contact;

/// Renders contacts as vCard 3.0 cards in discovery order. The card name falls
/// back to the phone, then the email, when no name was resolved. Constant
/// report fields become one `X-SIFTER-FIELD:NAME=VALUE` line each.
pub fn export_vcf(contacts: &[Contact], report_fields: &[(String, String)]) -> String {
    let mut out = String::new();
    for contact in contacts {
        out.push_str("BEGIN:VCARD\r\n");
        out.push_str("VERSION:3.0\r\n");
        out.push_str(&format!(
            "FN:{}\r\n",
            escape_vcard_value(&display_name(contact))
        ));

        if let Some(phone) = &contact.phone {
            out.push_str(&format!(
                "TEL;TYPE=CELL:{}\r\n",
                escape_vcard_value(phone)
            ));
        }
        if let Some(email) = &contact.email {
            out.push_str(&format!("EMAIL:{}\r\n", escape_vcard_value(email)));
        }
        out.push_str(&format!(
            "NOTE:{}\r\n",
            escape_vcard_value(&contact.source)
        ));
        for (name, value) in report_fields {
            out.push_str(&format!(
                "X-SIFTER-FIELD:{}\r\n",
                escape_vcard_value(&format!("{name}={value}"))
            ));
        }

        out.push_str("END:VCARD\r\n");
    }
    out
}

fn display_name(contact: &Contact) -> String {
    match &contact.name {
        Some(name) if name.is_known() => name.to_string(),
        _ => contact
            .phone
            .clone()
            .or_else(|| contact.email.clone())
            .unwrap_or_else(|| contact.source.clone()),
    }
}

fn escape_vcard_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' | '\r' => out.push_str("\\n"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::export_vcf;
    use sifter_core::{Contact, ContactName};

    #[test]
    fn cards_keep_order_and_fall_back_to_phone() {
        let contacts = vec![
            Contact {
                phone: Some("3001234567".to_string()),
                email: None,
                name: Some(ContactName::Unknown),
                source: "b.csv".to_string(),
            },
            Contact {
                phone: Some("3109876543".to_string()),
                email: Some("ana@example.com".to_string()),
                name: Some(ContactName::Known("Ana".to_string())),
                source: "a.csv".to_string(),
            },
        ];

        let fields = vec![("Lote".to_string(), "A, norte".to_string())];
        let output = export_vcf(&contacts, &fields);
        let first = output.find("FN:3001234567").expect("fallback name");
        let second = output.find("FN:Ana").expect("known name");
        assert!(first < second);
        assert!(output.contains("TEL;TYPE=CELL:3109876543\r\n"));
        assert!(output.contains("EMAIL:ana@example.com\r\n"));
        assert!(output.contains("NOTE:a.csv\r\n"));
        assert_eq!(output.matches("X-SIFTER-FIELD:Lote=A\\, norte\r\n").count(), 2);
        assert_eq!(output.matches("BEGIN:VCARD").count(), 2);
    }

    #[test]
    fn email_only_contact_uses_email_as_name() {
        let contacts = vec![Contact {
            phone: None,
            email: Some("solo@example.com".to_string()),
            name: None,
            source: "lista; final.csv".to_string(),
        }];
        let output = export_vcf(&contacts, &[]);
        assert!(output.contains("FN:solo@example.com\r\n"));
        assert!(output.contains("NOTE:lista\\; final.csv\r\n"));
        assert!(!output.contains("X-SIFTER-FIELD"));
    }
}
