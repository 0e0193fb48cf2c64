use maud::{html, Markup, DOCTYPE};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · 716Finder" }
                link rel="stylesheet" href=(LEAFLET_CSS);
                link rel="stylesheet" href="/static/main.css";
                script src=(HTMX_SRC) defer {};
                script src=(LEAFLET_JS) defer {};
                script src="/static/map.js" defer {};
            }
            body {
              header class="site-header" {
                  svg
                      xmlns="http://www.w3.org/2000/svg"
                      width="24"
                      height="24"
                      viewBox="0 0 24 24"
                      fill="none"
                      stroke="#524ed2"
                      stroke-width="2"
                      stroke-linecap="round"
                      stroke-linejoin="round"
                      class="icon"
                  {
                      path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                      path d="M12 11a3 3 0 1 0 0 -6a3 3 0 0 0 0 6z" {}
                      path d="M17.657 16.657l-4.243 4.243a2 2 0 0 1 -2.827 0l-4.244 -4.243a8 8 0 1 1 11.314 0z" {}
                  }
                  h3 { a href="/" { "716Finder" } }
                  nav {
                      ul {
                          li { a href="/" { "Home" } }
                          li { a href="/listings/new" { "Add listing" } }
                          li { a href="/stats" { "Stats" } }
                      }
                  }
              }
                (content)
            }
        }
    }
}
