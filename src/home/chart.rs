//! The pie chart showing how the total budget is split across categories.
//!
//! The chart is generated as an ECharts configuration with `charming` and
//! initialised by an inline script, so it is redrawn whenever the summary
//! partial is swapped in by htmx.

use charming::{
    Chart,
    component::Legend,
    datatype::DataPointItem,
    element::{ItemStyle, JsFunction, Label, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::budget::ChartSlice;

/// The HTML element ID of the budget chart container.
pub(super) const BUDGET_CHART_ID: &str = "budget-chart";

pub(super) fn budget_chart(slices: &[ChartSlice]) -> Chart {
    let data = slices
        .iter()
        .map(|slice| {
            DataPointItem::new(slice.value)
                .name(slice.label.as_str())
                .item_style(ItemStyle::new().color(slice.color.as_str()))
        })
        .collect::<Vec<_>>();

    Chart::new()
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(rupee_formatter()),
        )
        .legend(Legend::new().bottom("0"))
        .series(
            Pie::new()
                .name("Budget")
                .radius(vec!["40%", "70%"])
                .center(vec!["50%", "45%"])
                .label(Label::new().show(false))
                .data(data),
        )
}

/// The chart container followed by the script that draws `chart` into it.
pub(super) fn budget_chart_view(chart: &Chart) -> Markup {
    let script = format!(
        r#"(function() {{
            const chartDom = document.getElementById("{BUDGET_CHART_ID}");
            const existing = echarts.getInstanceByDom(chartDom);
            if (existing) {{
                existing.dispose();
            }}
            const chart = echarts.init(chartDom);
            chart.setOption({chart});

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#
    );

    html! {
        div id=(BUDGET_CHART_ID) class="w-full min-h-[300px]" {}
        script { (PreEscaped(script)) }
    }
}

#[inline]
fn rupee_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-IN', {
              style: 'currency',
              currency: 'INR'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

#[cfg(test)]
mod budget_chart_tests {
    use crate::budget::ChartSlice;

    use super::budget_chart;

    #[test]
    fn chart_has_one_data_point_per_slice() {
        let slices = [
            ChartSlice {
                label: "Rent".to_owned(),
                value: 12000.0,
                color: "#FF6E6E".to_owned(),
            },
            ChartSlice {
                label: "Food".to_owned(),
                value: 5000.0,
                color: "#6EE7B7".to_owned(),
            },
        ];

        let options = budget_chart(&slices).to_string();

        assert!(options.contains("\"pie\""));
        assert!(options.contains("Rent"));
        assert!(options.contains("Food"));
        assert!(options.contains("#FF6E6E"));
        assert!(options.contains("#6EE7B7"));
    }
}
