use crate::parsers::html;

const RESULT_PAGE: &str = r#"
<html><body>
  <div id="content_left">
    <div class="result c-container">
      <h3 class="t"><a href="https://example.com/1">Rust <em>编程</em>语言</a></h3>
      <span class="content-right_8Zs40 summary-text_560AW">一门赋予每个人
        构建可靠且高效软件能力的语言。</span>
    </div>
    <div class="result c-container">
      <h3 class="t"><a href="https://example.com/2">  Rust 教程  </a></h3>
      <span class="summary-text_560AW">入门与进阶</span>
    </div>
    <div class="result c-container">
      <h3 class="t"><a href="https://example.com/3">Cargo 手册</a></h3>
    </div>
  </div>
</body></html>
"#;

#[cfg(test)]
mod html_parser_tests {
    use super::*;

    #[test]
    fn test_extracts_titles_in_order() {
        let page = html::parse_results(RESULT_PAGE);
        assert_eq!(
            page.titles,
            vec!["Rust 编程语言", "Rust 教程", "Cargo 手册"]
        );
    }

    #[test]
    fn test_summary_class_substring_match() {
        let page = html::parse_results(RESULT_PAGE);
        assert_eq!(
            page.summaries,
            vec!["一门赋予每个人 构建可靠且高效软件能力的语言。", "入门与进阶"]
        );
    }

    #[test]
    fn test_unequal_lengths_are_not_padded() {
        let page = html::parse_results(RESULT_PAGE);
        assert_eq!(page.titles.len(), 3);
        assert_eq!(page.summaries.len(), 2);
        assert_eq!(page.lines().count(), 2);
    }

    #[test]
    fn test_h3_without_anchor_is_ignored() {
        let page = html::parse_results("<h3>plain heading</h3><h3><a>linked</a></h3>");
        assert_eq!(page.titles, vec!["linked"]);
    }

    #[test]
    fn test_empty_elements_are_skipped() {
        let page = html::parse_results(
            "<h3><a>   </a></h3><h3><a>kept</a></h3><span class=\"summary-text\"> </span>",
        );
        assert_eq!(page.titles, vec!["kept"]);
        assert!(page.summaries.is_empty());
    }

    #[test]
    fn test_non_html_input_yields_nothing() {
        let page = html::parse_results("{\"error\": \"captcha\"}");
        assert!(page.titles.is_empty());
        assert!(page.summaries.is_empty());
    }
}
