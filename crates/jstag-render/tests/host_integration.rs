use std::sync::Arc;

use insta::assert_snapshot;
use jstag_render::{environment, register_filters, FilterRegistry, MiniJinjaEvaluator, RenderConfig};
use minijinja::{context, Environment};
use proptest::prelude::*;

const TABS_TEMPLATE: &str = "\
{% filter jst_each %}
  collection: tabs
  item: tab
{% endfilter %}
<div class=\"tab\">
  <p>Paragraph text: {% filter jst_js %}
    = tab.get('body')
  {% endfilter %}</p>
</div>
{{ none | jst_end('each') }}";

#[test]
fn test_tabs_template() {
    let env = environment(&RenderConfig::default());
    let output = env.render_str(TABS_TEMPLATE, ()).unwrap();

    assert_snapshot!(output, @r#"
    <% tabs.each(function(tab) { %>
    <div class="tab">
      <p>Paragraph text: <%= tab.get('body') %></p>
    </div>
    <% }); %>
    "#);
}

#[test]
fn test_conditional_chain_in_html() {
    let mut env = environment(&RenderConfig::default());
    env.add_template(
        "status.html",
        "{{ cond | jst_if }}<b>on</b>{{ none | jst_else }}<i>off</i>{{ none | jst_end }}",
    )
    .unwrap();

    let output = env
        .get_template("status.html")
        .unwrap()
        .render(context! { cond => "model.get('on') && x < 3\n" })
        .unwrap();

    assert_snapshot!(output, @"<% if(model.get('on') && x < 3) { %><b>on</b><% } else { %><i>off</i><% } %>");
}

#[test]
fn test_compile_text_with_context() {
    let evaluator = MiniJinjaEvaluator::new().with_context(context! { app => "Inbox" });
    let registry = FilterRegistry::with_evaluator(Arc::new(evaluator));

    let mut env = Environment::new();
    register_filters(&mut env, &registry, &RenderConfig::default());

    let output = env
        .render_str(
            "{% filter jst_js %}\n= app ~ ' - ' ~ 'Mail'\n= model.get('subject')\n= app == 'Inbox'\n{% endfilter %}",
            (),
        )
        .unwrap();

    assert_snapshot!(output, @"<%= Inbox - Mail %><%= model.get('subject') %><%= app == 'Inbox' %>");
}

#[test]
fn test_link_helper_uses_evaluator() {
    let evaluator = MiniJinjaEvaluator::new().with_context(context! { label => "Home" });
    let registry = FilterRegistry::with_evaluator(Arc::new(evaluator));

    let mut env = Environment::new();
    register_filters(&mut env, &registry, &RenderConfig::default());

    let output = env
        .render_str("<%= {{ jst_link_to('label', 'urls.root') }} %>", ())
        .unwrap();

    assert_snapshot!(output, @r#"<%= "<a href='" + urls.root + "'  >" + Home + "</a>" %>"#);
}

#[test]
fn test_registry_matches_core_render() {
    let registry = FilterRegistry::standard();
    let lines = ["each", "= item.name", "if item.done", "else", "end", "endeach"];
    let via_registry = registry.translate_named("js", lines, None).unwrap();
    let via_core = jstag::render_named("js", lines, None).unwrap();
    assert_eq!(via_registry, via_core);
}

proptest! {
    /// Indentation and blank lines in a host block never change the output.
    #[test]
    fn indentation_is_ignored(
        lines in prop::collection::vec("(= [a-z.()']{1,12}|if [a-z<> ]{1,8}|else|end|each [a-z]{1,5})", 1..8),
        indent in 0usize..6,
    ) {
        let env = environment(&RenderConfig::default());
        let pad = " ".repeat(indent);
        let block: String = lines.iter().map(|l| format!("{}{}\n\n", pad, l)).collect();

        let expected = jstag::render_named("js", lines.iter().map(String::as_str), None).unwrap();
        let output = env
            .render_str("{{ block | jst_js }}", context! { block => block })
            .unwrap();
        prop_assert_eq!(output, expected);
    }
}
