use std::fs;
use std::path::{Path, PathBuf};

use md2html_core::{Document, TemplateId};
use md2html_renderer::{Renderer, ResolutionReason, TemplateRegistry};
use tempfile::TempDir;

fn doc(root: &Path, rel: &str, raw: &str) -> Document {
    Document::parse(root, root.join(rel), raw.to_string())
}

fn write(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write");
    path.to_path_buf()
}

#[test]
fn front_matter_document_through_builtin_template() {
    let renderer = Renderer::new(TemplateRegistry::builtin().expect("builtin"));
    let root = Path::new("/in");
    let page = renderer
        .render_document(&doc(root, "a.md", "---\ntitle: Hello\n---\n\n# Hi\n"), Some(root))
        .expect("render");

    assert!(page.template.is_fallback());
    assert_eq!(page.reason, ResolutionReason::Fallback);
    assert!(page.html.contains("<title>Hello</title>"), "html:\n{}", page.html);
    assert!(page.html.contains("<h1>Hi</h1>"));
    assert!(page.html.contains(r#"<meta name="title" content="Hello">"#));
}

#[test]
fn list_and_quoted_values_in_meta_tags() {
    let renderer = Renderer::new(TemplateRegistry::builtin().unwrap());
    let html = renderer
        .render(
            "Body",
            Some(&serde_yaml::from_str("tags: [a, b, c]\nquote: 'He said \"hi\"'\n").unwrap()),
            &TemplateId::fallback(),
        )
        .unwrap();
    assert!(html.contains(r#"<meta name="tags" content="a, b, c">"#));
    assert!(html.contains(r#"<meta name="quote" content="He said &quot;hi&quot;">"#));
    assert!(html.contains("<title>Document</title>"));
}

#[test]
fn templates_on_disk_resolve_by_name_and_directory() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let same_name = write(&root.join("notes/today.jinja"), "NOTE {{ content }}");
    let dir_tpl = write(&root.join("layouts/blog.jinja"), "BLOG {{ title }}");
    let registry = TemplateRegistry::load(&[same_name.clone(), dir_tpl.clone()]).unwrap();
    let renderer = Renderer::new(registry);

    let page = renderer
        .render_document(&doc(root, "notes/today.md", "text\n"), Some(root))
        .unwrap();
    assert_eq!(page.template, TemplateId::from_path(&same_name));
    assert_eq!(page.html, "NOTE <p>text</p>\n");

    let page = renderer
        .render_document(
            &doc(root, "blog/2024/post.md", "---\ntitle: Post\n---\nbody\n"),
            Some(root),
        )
        .unwrap();
    assert_eq!(page.template, TemplateId::from_path(&dir_tpl));
    assert_eq!(page.reason, ResolutionReason::Directory);
    assert_eq!(page.html, "BLOG Post");
}

#[test]
fn explicit_template_override_wins() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let special = write(&root.join("layouts/special.jinja"), "SPECIAL {{ title }}");
    write(&root.join("docs/docs.jinja"), "DOCS");
    let registry = TemplateRegistry::load(&[
        root.join("docs/docs.jinja"),
        special.clone(),
    ])
    .unwrap();
    let renderer = Renderer::new(registry);

    let page = renderer
        .render_document(
            &doc(root, "docs/page.md", "---\ntitle: T\ntemplate: special\n---\n"),
            Some(root),
        )
        .unwrap();
    assert_eq!(page.template, TemplateId::from_path(&special));
    assert_eq!(page.reason, ResolutionReason::FrontMatter);
    assert_eq!(page.html, "SPECIAL T");
}

#[test]
fn resolution_always_names_a_registered_template() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let tpl = write(&root.join("a.jinja"), "A");
    let registry = TemplateRegistry::load(&[tpl]).unwrap();
    for rel in ["a.md", "b.md", "x/y/z.md", "a/b.md"] {
        for meta in [None, Some("template: zzz\n"), Some("template: a\n")] {
            let raw = meta
                .map(|m| format!("---\n{m}---\n"))
                .unwrap_or_default();
            let d = doc(root, rel, &raw);
            let r = registry.select(d.input_path(), d.metadata(), Some(root));
            assert!(registry.contains(&r.id), "{rel} {meta:?} -> {}", r.id);
        }
    }
}

#[test]
fn no_crlf_in_builtin_output() {
    let renderer = Renderer::new(TemplateRegistry::builtin().unwrap());
    let html = renderer.render("a\nb\n", None, &TemplateId::fallback()).unwrap();
    assert!(!html.contains('\r'));
}
