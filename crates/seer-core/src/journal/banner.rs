//! Boxed section headers for text logs.

use crate::error::{SeerError, SeerResult};

/// Inner width of a banner, between the `#` borders.
pub const BANNER_WIDTH: usize = 24;

/// Check that `title` fits inside a banner.
pub fn check_title(title: &str) -> SeerResult<()> {
    let len = title.chars().count();
    if len > BANNER_WIDTH {
        return Err(SeerError::PreconditionViolated(format!(
            "header '{title}' is {len} characters, banners hold {BANNER_WIDTH}"
        )));
    }
    Ok(())
}

/// Render a five-line banner with `title` centred, extra space going right.
///
/// Titles wider than the banner are not truncated; the box just grows
/// ragged. Use [`check_title`] to reject them up front.
pub fn render(title: &str) -> String {
    let slack = BANNER_WIDTH.saturating_sub(title.chars().count());
    let left = slack / 2;
    let right = slack - left;
    let border = "#".repeat(BANNER_WIDTH + 2);
    let padding = format!("#{}#", " ".repeat(BANNER_WIDTH));
    let line = format!("#{}{title}{}#", " ".repeat(left), " ".repeat(right));
    [border.as_str(), &padding, &line, &padding, &border].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_centred_title() {
        insta::assert_snapshot!(render("EXAMPLE HEADER"), @r"
        ##########################
        #                        #
        #     EXAMPLE HEADER     #
        #                        #
        ##########################
        ");
    }

    #[test]
    fn odd_slack_goes_right() {
        let out = render("STATS");
        let line = out.lines().nth(2).unwrap();
        assert_eq!(line, "#         STATS          #");
        assert!(out.lines().all(|l| l.len() == BANNER_WIDTH + 2));
    }

    #[test]
    fn full_width_title() {
        let title = "x".repeat(BANNER_WIDTH);
        let out = render(&title);
        assert_eq!(out.lines().nth(2).unwrap(), format!("#{title}#"));
        assert!(check_title(&title).is_ok());
    }

    #[test]
    fn too_wide_title_rejected() {
        let title = "y".repeat(BANNER_WIDTH + 1);
        assert!(matches!(
            check_title(&title),
            Err(SeerError::PreconditionViolated(_))
        ));
    }
}
