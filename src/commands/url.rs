use git_well::git::{GitUrl, UrlComponent};
use git_well::styling::println;

/// Render a URL's info record as pretty JSON, or a single component.
pub fn render_url(
    url: &str,
    component: Option<UrlComponent>,
    protocol: Option<&str>,
) -> anyhow::Result<String> {
    let mut url = GitUrl::parse(url)?;
    if let Some(protocol) = protocol {
        url = url.to_protocol(protocol)?;
    }
    let info = url.info()?;
    Ok(match component {
        None => serde_json::to_string_pretty(info)?,
        Some(component) => info.component(component).unwrap_or_default().to_string(),
    })
}

pub fn handle_url(
    url: &str,
    component: Option<UrlComponent>,
    protocol: Option<&str>,
) -> anyhow::Result<()> {
    println!("{}", render_url(url, component, protocol)?);
    Ok(())
}
