//! Line-oriented interactive session over a [`PhonebookApp`].
//!
//! Rows are addressed by the number printed next to them; the app resolves
//! row numbers to record ids.

use phonebook_core::{ContactDirectory, PhonebookApp, RowActionKind};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  list              show every contact
  search <text>     filter by name or phone (empty text clears)
  add               enter a new contact
  edit <row>        change the contact at <row>
  delete <row>      delete the contact at <row>
  cancel            leave update mode and clear the form
  reload            fetch contacts again
  help              show this text
  quit              leave
";

/// Runs the session until `quit` or end of input.
pub fn run_shell<D, R, W>(app: &mut PhonebookApp<D>, mut input: R, mut out: W) -> io::Result<()>
where
    D: ContactDirectory,
    R: BufRead,
    W: Write,
{
    // A failed initial load is shown like any other error; the session stays
    // usable and `reload` can retry.
    let _ = app.init();
    render(app, &mut out)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_line(&mut input)? else {
            return Ok(());
        };
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest),
            None => (line.as_str(), ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "help" => {
                out.write_all(HELP.as_bytes())?;
                continue;
            }
            "list" => {
                app.search("");
            }
            "search" => {
                app.search(rest);
            }
            "reload" => {
                let _ = app.init();
            }
            "cancel" => {
                app.cancel_edit();
                writeln!(out, "[{}]", app.submit_label())?;
                continue;
            }
            "add" => {
                app.cancel_edit();
                if !fill_form(app, &mut input, &mut out)? {
                    return Ok(());
                }
                let _ = app.submit();
            }
            "edit" => {
                let Some(row) = parse_row(rest, &mut out)? else {
                    continue;
                };
                if app.trigger_row(row, RowActionKind::Edit).is_ok() && app.session().is_editing()
                {
                    if !fill_form(app, &mut input, &mut out)? {
                        return Ok(());
                    }
                    let _ = app.submit();
                }
            }
            "delete" => {
                let Some(row) = parse_row(rest, &mut out)? else {
                    continue;
                };
                let _ = app.trigger_row(row, RowActionKind::Delete);
            }
            other => {
                writeln!(out, "unknown command `{other}`; type `help`")?;
                continue;
            }
        }
        render(app, &mut out)?;
    }
}

fn render<D: ContactDirectory, W: Write>(app: &PhonebookApp<D>, out: &mut W) -> io::Result<()> {
    if !app.error_message().is_empty() {
        writeln!(out, "! {}", app.error_message())?;
    }
    out.write_all(app.visible().render_text().as_bytes())?;
    out.flush()
}

/// Prompts for each field. Blank input keeps the current value, so editing
/// only retypes what changes. Returns `false` on end of input.
fn fill_form<D, R, W>(app: &mut PhonebookApp<D>, input: &mut R, out: &mut W) -> io::Result<bool>
where
    D: ContactDirectory,
    R: BufRead,
    W: Write,
{
    writeln!(out, "[{}]", app.submit_label())?;
    for field in [Field::Name, Field::Phone, Field::Email] {
        let form = &mut app.session_mut().form;
        let slot = match field {
            Field::Name => &mut form.name,
            Field::Phone => &mut form.phone,
            Field::Email => &mut form.email,
        };
        if slot.is_empty() {
            write!(out, "{}: ", field.label())?;
        } else {
            write!(out, "{} [{}]: ", field.label(), slot)?;
        }
        out.flush()?;
        let Some(value) = read_line(input)? else {
            return Ok(false);
        };
        if !value.is_empty() {
            *slot = value;
        }
    }
    Ok(true)
}

#[derive(Clone, Copy)]
enum Field {
    Name,
    Phone,
    Email,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Email => "Email",
        }
    }
}

fn parse_row<W: Write>(text: &str, out: &mut W) -> io::Result<Option<usize>> {
    match text.trim().parse::<usize>() {
        Ok(row) => Ok(Some(row)),
        Err(_) => {
            writeln!(out, "expected a row number, got `{}`", text.trim())?;
            Ok(None)
        }
    }
}

/// Reads one line without its terminator. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::{run_shell, HELP};
    use phonebook_core::{
        Contact, ContactId, DirectoryOperation, InMemoryDirectory, PhonebookApp, RemoteError,
    };
    use std::io::Cursor;

    fn run(directory: &InMemoryDirectory, script: &str) -> String {
        let mut app = PhonebookApp::new(directory);
        let mut out = Vec::new();
        run_shell(&mut app, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn seeded() -> InMemoryDirectory {
        InMemoryDirectory::with_contacts(vec![
            Contact::new(1_u64, "Ann", "1234567890", "a@x.com"),
            Contact::new(2_u64, "Bob", "5550001111", "b@x.com"),
        ])
    }

    #[test]
    fn help_descriptions_share_one_column() {
        for line in HELP.lines().skip(1) {
            let bytes = line.as_bytes();
            assert_eq!(bytes[19], b' ', "{line}");
            assert_ne!(bytes[20], b' ', "{line}");
        }
    }

    #[test]
    fn add_prompts_and_appends() {
        let directory = seeded();
        let output = run(&directory, "add\nCy\n5551234567\ncy@x.com\nquit\n");

        assert!(output.contains("[Add Contact]"));
        assert!(output.contains("  3. Cy"));
        assert_eq!(directory.records().len(), 3);
    }

    #[test]
    fn invalid_add_shows_validation_message() {
        let directory = seeded();
        let output = run(&directory, "add\nCy\n123\ncy@x.com\n");

        assert!(output.contains("! Phone number must be exactly 10 digits."));
        assert_eq!(directory.records().len(), 2);
    }

    #[test]
    fn edit_keeps_blank_fields() {
        let directory = seeded();
        let output = run(&directory, "edit 2\nRobert\n\n\nquit\n");

        assert!(output.contains("[Update Contact]"));
        assert!(output.contains("Phone [5550001111]: "));
        let records = directory.records();
        assert_eq!(records[1].id, ContactId::from(2_u64));
        assert_eq!(records[1].name, "Robert");
        assert_eq!(records[1].phone, "5550001111");
    }

    #[test]
    fn cancel_after_failed_update_returns_to_add_mode() {
        let directory = seeded();
        let output = run(&directory, "edit 1\n\n123\n\ncancel\nquit\n");

        assert!(output.contains("! Phone number must be exactly 10 digits."));
        assert!(output.ends_with("[Add Contact]\n> "));
        assert_eq!(directory.records()[0].phone, "1234567890");
    }

    #[test]
    fn delete_uses_filtered_row_numbers() {
        let directory = seeded();
        run(&directory, "search bob\ndelete 1\n");

        let records = directory.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ann");
    }

    #[test]
    fn failed_load_is_reported_and_reload_recovers() {
        let directory = seeded();
        directory.fail_next(DirectoryOperation::List, RemoteError::Status(500));
        let output = run(&directory, "reload\n");

        assert!(output.contains("! Error fetching contacts: Failed to fetch contacts (HTTP 500)"));
        assert!(output.contains("  1. Ann"));
    }

    #[test]
    fn bad_row_argument_is_rejected_locally() {
        let directory = seeded();
        let output = run(&directory, "delete x\nfrobnicate\n");

        assert!(output.contains("expected a row number, got `x`"));
        assert!(output.contains("unknown command `frobnicate`"));
        assert_eq!(directory.requests().len(), 1);
    }
}
