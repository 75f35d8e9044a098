use keyword_cluster::{cluster_keywords, ClusterReport};

fn main() {
    let keywords = [
        "seo tools",
        "seo tool",
        "best seo tools",
        "buy running shoes",
        "buy running shoe",
        "search console login",
        "how to do keyword research",
        "keyword research",
    ];

    let clusters = cluster_keywords(&keywords, 0.5);
    for cluster in &clusters {
        println!(
            "{} [{}] avg={:.3} -> {:?}",
            cluster.main_keyword, cluster.intent, cluster.average_similarity, cluster.similar_keywords
        );
    }

    let report = ClusterReport::new(clusters);
    match report.to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize report: {e}"),
    }
}
