//! HTML body for OTP emails

use ev_core::domain::entities::otp_record::OtpPurpose;

fn action_line(purpose: OtpPurpose) -> &'static str {
    match purpose {
        OtpPurpose::Registration => "Use this code to complete your registration",
        OtpPurpose::Deletion => "Use this code to confirm deletion of your registration",
        OtpPurpose::AdminLogin => "Use this code to sign in to the admin dashboard",
    }
}

/// Escape text interpolated into the HTML body
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the OTP email
pub fn otp_email_html(
    name: &str,
    code: &str,
    purpose: OtpPurpose,
    lifetime_minutes: i64,
    event_name: &str,
) -> String {
    let name = escape_html(name);
    let event_name = escape_html(event_name);
    let action = action_line(purpose);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; background: #f4f4f4; padding: 20px; }}
    .container {{ max-width: 600px; margin: 0 auto; background: #fff; border-radius: 10px; overflow: hidden; }}
    .header {{ background: #667eea; color: #fff; padding: 24px; text-align: center; }}
    .content {{ padding: 30px; }}
    .otp-box {{ border: 2px dashed #667eea; padding: 20px; text-align: center; font-size: 36px; font-weight: bold; letter-spacing: 8px; color: #667eea; }}
    .warning {{ background: #fff3cd; padding: 15px; border-radius: 5px; color: #856404; }}
    .footer {{ text-align: center; color: #666; font-size: 12px; padding: 20px; border-top: 1px solid #eee; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header"><h1>{event_name}</h1></div>
    <div class="content">
      <h2>Hello {name},</h2>
      <p>{action}:</p>
      <div class="otp-box">{code}</div>
      <div class="warning">
        <strong>Important:</strong> This OTP is valid for {lifetime_minutes} minutes only.
        Do not share it with anyone.
      </div>
      <p>If you didn't request this OTP, please ignore this email.</p>
    </div>
    <div class="footer">This is an automated message, please do not reply.</div>
  </div>
</body>
</html>
"#
    )
}
